use std::net::SocketAddr;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "vm.toml";
pub const ENV_PREFIX: &str = "VM_";

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Public base url, used for absolute links.
    pub url: String,
    pub database_url: String,
    #[serde(default = "default_listen_address")]
    pub listen_address: SocketAddr,
    /// `EnvFilter` directives, `RUST_LOG` still takes precedence.
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(value: figment::Error) -> Self {
        Self::Figment(Box::new(value))
    }
}

pub fn figment() -> Figment {
    Figment::new()
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX))
}

pub fn get_config() -> Result<Config, ConfigError> {
    Ok(figment().extract()?)
}
