//! Process configuration, read from the environment.
//!
//! - `DB_CONNECTION_URL`: document store connection string (required when
//!   `STORE_MODE=redis`)
//! - `STORE_MODE`: `redis` (default) | `in_memory`
//! - `HOST`: bind host (default: `0.0.0.0`)
//! - `PORT`: bind port (default: `3001`)

use std::env;
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("DB_CONNECTION_URL must be set when STORE_MODE is redis")]
    MissingConnectionUrl,

    #[error("invalid PORT value: {0}")]
    InvalidPort(String),

    #[error("invalid STORE_MODE value: {0}")]
    InvalidStoreMode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreMode {
    #[default]
    Redis,
    /// Records live in process memory and vanish on exit.
    InMemory,
}

impl FromStr for StoreMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            _ => Err(ConfigError::InvalidStoreMode(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store_mode: StoreMode,
    pub connection_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let store_mode = get("STORE_MODE")
            .map(|value| value.trim().parse())
            .transpose()?
            .unwrap_or_default();

        let connection_url = get("DB_CONNECTION_URL");
        if store_mode == StoreMode::Redis && connection_url.is_none() {
            return Err(ConfigError::MissingConnectionUrl);
        }

        let port = match get("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            store_mode,
            connection_url,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
