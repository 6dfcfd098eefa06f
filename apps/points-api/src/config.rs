//! Points API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;

use points_core::ValidationPolicy;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default request body limit (1MB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Points API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind (default: 0.0.0.0)
    pub bind_addr: String,

    /// HTTP listen port
    pub port: u16,

    /// Reject receipts with malformed amounts/dates/times
    pub strict_validation: bool,

    /// Max request body size in bytes
    pub max_body_bytes: usize,

    /// tracing-subscriber EnvFilter directive
    pub log_filter: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            strict_validation: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_filter: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the environment in
    /// production, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            bind_addr: lookup("POINTS_API_BIND_ADDR").unwrap_or(defaults.bind_addr),

            port: parse_or(&lookup, "POINTS_API_PORT", defaults.port)?,

            strict_validation: parse_or(&lookup, "POINTS_API_STRICT", defaults.strict_validation)?,

            max_body_bytes: parse_or(&lookup, "POINTS_API_MAX_BODY_BYTES", defaults.max_body_bytes)?,

            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
        };

        if config.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue("POINTS_API_MAX_BODY_BYTES".to_string()));
        }

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Validation policy selected by `strict_validation`.
    pub fn validation_policy(&self) -> ValidationPolicy {
        ValidationPolicy::from_strict_flag(self.strict_validation)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
