//! Runtime configuration.
//!
//! Defaults, then an optional TOML file, then environment variables (a
//! `.env` file is honoured). The resulting `Settings` is passed explicitly to
//! whatever needs it.

use crate::stats::DEFAULT_HIGH_RAINFALL_MM;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_DATA_PATH: &str = "WEATHER_DATA_PATH";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_LOG: &str = "WEATHER_LOG";
pub const ENV_RAINFALL_THRESHOLD: &str = "WEATHER_RAINFALL_THRESHOLD";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid value '{value}' for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// CSV file ingested by `load` and `run`.
    pub data_path: PathBuf,
    pub database_url: String,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
    pub high_rainfall_threshold: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data").join("Weather Training Data.csv"),
            database_url: "sqlite://weather.db".to_string(),
            log_filter: "info".to_string(),
            high_rainfall_threshold: DEFAULT_HIGH_RAINFALL_MM,
        }
    }
}

impl Settings {
    /// Build settings from an optional TOML file plus the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let settings = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.with_env(|key| env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Apply overrides from `lookup` (the environment in production).
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DATA_PATH) {
            self.data_path = PathBuf::from(path);
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database_url = url;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        if let Some(value) = lookup(ENV_RAINFALL_THRESHOLD) {
            self.high_rainfall_threshold = value.trim().parse().map_err(|_| {
                ConfigError::InvalidEnv {
                    key: ENV_RAINFALL_THRESHOLD,
                    value,
                }
            })?;
        }
        Ok(self)
    }
}
