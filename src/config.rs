use reqwest::Url;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_STORAGE_PATH: &str = "data/client_storage.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: Url,
    pub storage_path: PathBuf,
}

#[derive(Debug, thiserror::Error)]
#[error("invalid value for {key}: {reason}")]
pub struct ConfigError {
    key: &'static str,
    reason: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("PORT", "8080")?,
            api_base_url: try_load("ACTIVITIES_API_URL", DEFAULT_API_URL)?,
            storage_path: PathBuf::from(load_or("APP_STORAGE_PATH", DEFAULT_STORAGE_PATH)),
        })
    }
}

fn load_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    load_or(key, default).parse().map_err(|err: T::Err| {
        warn!("Invalid {key} value: {err}");
        ConfigError {
            key,
            reason: err.to_string(),
        }
    })
}
