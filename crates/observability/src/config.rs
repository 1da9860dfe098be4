//! Observability configuration.
//!
//! | variable            | default | meaning                          |
//! |---------------------|---------|----------------------------------|
//! | `RUST_LOG`          | `info`  | `EnvFilter` directives           |
//! | `SATTVA_LOG_FORMAT` | `json`  | `json` or `pretty` log lines     |

use core::str::FromStr;

use thiserror::Error;

pub const FILTER_VAR: &str = "RUST_LOG";
pub const FORMAT_VAR: &str = "SATTVA_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid SATTVA_LOG_FORMAT: {0:?} (expected \"json\" or \"pretty\")")]
    InvalidLogFormat(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset or blank variables fall
    /// back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let format = match get(FORMAT_VAR) {
            Some(raw) => raw.parse()?,
            None => defaults.format,
        };

        Ok(Self {
            filter: get(FILTER_VAR).unwrap_or(defaults.filter),
            format,
        })
    }
}
