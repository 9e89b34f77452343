//! Configuration Module
//!
//! Handles loading and validating service configuration from environment
//! variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, ConfigError};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Capacities are fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of cached predictions
    pub max_entries: usize,
    /// Byte budget for cached predictions
    pub max_bytes: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Upstream model server endpoint
    pub inference_url: String,
    /// Per-call inference timeout in seconds, 0 disables it
    pub inference_timeout_secs: u64,
    /// Metrics publish interval in seconds
    pub metrics_interval_secs: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_ENTRIES` - Maximum cached predictions (default: 1000)
    /// - `CACHE_MAX_BYTES` - Cache byte budget (default: 1 GiB)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `INFERENCE_URL` - Upstream model server (default: http://127.0.0.1:8080/infer)
    /// - `INFERENCE_TIMEOUT_SECS` - Inference timeout (default: 30)
    /// - `METRICS_INTERVAL_SECS` - Metrics publish frequency (default: 15)
    ///
    /// A variable that is set but cannot be parsed is an error rather than
    /// a silent fallback to the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            max_entries: parse_var("CACHE_MAX_ENTRIES", defaults.max_entries)?,
            max_bytes: parse_var("CACHE_MAX_BYTES", defaults.max_bytes)?,
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
            inference_url: env::var("INFERENCE_URL").unwrap_or(defaults.inference_url),
            inference_timeout_secs: parse_var(
                "INFERENCE_TIMEOUT_SECS",
                defaults.inference_timeout_secs,
            )?,
            metrics_interval_secs: parse_var(
                "METRICS_INTERVAL_SECS",
                defaults.metrics_interval_secs,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects capacities that would make the cache unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidCapacity(
                "CACHE_MAX_ENTRIES must be greater than zero".to_string(),
            )
            .into());
        }
        if self.max_bytes == 0 {
            return Err(CacheError::InvalidCapacity(
                "CACHE_MAX_BYTES must be greater than zero".to_string(),
            )
            .into());
        }
        if self.metrics_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "METRICS_INTERVAL_SECS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }

    /// Inference timeout, if enabled.
    pub fn inference_timeout(&self) -> Option<Duration> {
        (self.inference_timeout_secs > 0).then(|| Duration::from_secs(self.inference_timeout_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            max_bytes: 1024 * 1024 * 1024,
            server_port: 3000,
            inference_url: "http://127.0.0.1:8080/infer".to_string(),
            inference_timeout_secs: 30,
            metrics_interval_secs: 15,
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        Err(_) => Ok(default),
    }
}
