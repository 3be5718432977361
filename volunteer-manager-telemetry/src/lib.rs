use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::Layer;

pub const DEFAULT_LOG_LEVEL: &str =
    "info,volunteer_manager_backend=debug,volunteer_manager_database=debug,hyper=info,h2=info";

#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("failed to install the tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// `RUST_LOG` wins over the configured filter, which wins over
/// [`DEFAULT_LOG_LEVEL`].
pub fn env_filter(configured: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    Ok(EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_LEVEL))?)
}

pub fn setup_telemetry(configured: Option<&str>) -> Result<(), TelemetryError> {
    let filter = env_filter(configured)?;

    // will also redirect log events to trace events
    let stdout_log = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(stdout_log.with_filter(filter))
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_LOG_LEVEL).is_ok());
    }

    #[test]
    fn configured_filter_is_validated() {
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(env_filter(Some("debug")).is_ok());
            assert!(matches!(
                env_filter(Some("volunteer_manager=loud")),
                Err(TelemetryError::Filter(_))
            ));
        }
    }
}
