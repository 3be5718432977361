use volunteer_manager_backend::error::AppError;
use volunteer_manager_backend::run_server;
use volunteer_manager_config::get_config;
use volunteer_manager_telemetry::setup_telemetry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = get_config()?;
    // avoid logging before this point, nothing would be printed
    setup_telemetry(config.log_filter.as_deref())?;

    run_server(config).await?.await
}
