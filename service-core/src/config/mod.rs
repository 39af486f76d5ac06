pub mod environment;

use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;

pub use environment::{Environment, Resolved, process_env, resolve_first, resolve_key};

/// Settings shared by every service: listen port and log level.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port", rename = "api_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_source(env_source())
    }

    fn from_source(env: config::Environment) -> Result<Self, AppError> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn env_source() -> config::Environment {
    config::Environment::default()
        .try_parsing(true)
        .ignore_empty(true)
}
