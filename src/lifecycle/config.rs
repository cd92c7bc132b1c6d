//! Store configuration, loaded from the environment with logged defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub const BUFFER_VAR: &str = "CATALOG_STORE_BUFFER";
pub const TIMEOUT_VAR: &str = "CATALOG_REQUEST_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Sizing and timing for the store actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Capacity of the request channel. Callers wait when it is full.
    pub buffer_size: usize,
    /// Upper bound on each store call, queueing included.
    pub request_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            request_timeout_ms: 5_000,
        }
    }
}

impl StoreConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads from any key/value source; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            buffer_size: try_load(&lookup, BUFFER_VAR, defaults.buffer_size)?,
            request_timeout_ms: try_load(&lookup, TIMEOUT_VAR, defaults.request_timeout_ms)?,
        };
        if config.buffer_size == 0 {
            return Err(ConfigError::Invalid {
                key: BUFFER_VAR,
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }
        Ok(config)
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
