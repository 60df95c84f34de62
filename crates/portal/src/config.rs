//! Environment-driven configuration for the portal server.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {key} ({value:?}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub address: String,
    pub port: u16,
    /// JSON file holding the refund/reschedule policy table
    pub policy_file: PathBuf,
    /// How long a loaded policy table is served before the file is read again
    pub policy_ttl: Duration,
}

impl PortalConfig {
    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            address: try_load(&lookup, "PORTAL_ADDRESS", "0.0.0.0")?,
            port: try_load(&lookup, "PORTAL_PORT", "8080")?,
            policy_file: try_load(&lookup, "PORTAL_POLICY_FILE", "policy.json")?,
            policy_ttl: Duration::from_secs(try_load(&lookup, "PORTAL_POLICY_TTL_SECS", "300")?),
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
        value,
    })
}
