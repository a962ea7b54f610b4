//! Controller connection settings, loaded once at startup.
//!
//! Accepted layouts:
//! - flat: `{"host": "...", "port": 80, "password": "...", "refresh_interval": 2}`
//! - nested: `{"opensprinkler": { ...same keys... }}`
//!
//! Missing keys fall back to the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_ENV: &str = "SPRINKLER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";
const SECTION: &str = "opensprinkler";

/// Polls closer together than this only load the controller.
const MIN_REFRESH_SECS: f64 = 1.0;

/// The device refuses `/cm` runs longer than 18 hours.
pub const MAX_DURATION_SECS: u32 = 64_800;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {0} not found")]
    NotFound(PathBuf),
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub password: String,
    /// Seconds between status polls. Fractions are allowed; anything
    /// under a second is raised to one.
    pub refresh_interval: f64,
    /// Seconds a zone runs when started, before the user moves its slider.
    pub default_duration: u32,
    /// Seconds before a device request is abandoned.
    pub request_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "192.168.1.15".to_string(),
            port: 80,
            password: "opendoor".to_string(),
            refresh_interval: 1.0,
            default_duration: 300,
            request_timeout: 5,
        }
    }
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &"<redacted>")
            .field("refresh_interval", &self.refresh_interval)
            .field("default_duration", &self.default_duration)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Resolve the config path (`$SPRINKLER_CONFIG` or `./config.json`) and load it.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let json_err = |source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        };

        let mut doc: serde_json::Value = serde_json::from_str(&raw).map_err(json_err)?;
        let section = if doc.get(SECTION).is_some() {
            doc[SECTION].take()
        } else {
            doc
        };

        let config: Config = serde_json::from_value(section).map_err(json_err)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host is empty".into()));
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must be non-zero".into()));
        }
        if !self.refresh_interval.is_finite() || self.refresh_interval <= 0.0 {
            return Err(ConfigError::Invalid(
                "refresh_interval must be a positive number of seconds".into(),
            ));
        }
        if self.request_timeout == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout must be at least 1 second".into(),
            ));
        }
        if !(1..=MAX_DURATION_SECS).contains(&self.default_duration) {
            return Err(ConfigError::Invalid(format!(
                "default_duration must be between 1 and {MAX_DURATION_SECS} seconds"
            )));
        }
        Ok(())
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host.trim(), self.port)
    }

    pub fn refresh_every(&self) -> Duration {
        Duration::from_secs_f64(self.refresh_interval.max(MIN_REFRESH_SECS))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
