//! Broker configuration with validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Timeout applied when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Broker configuration.
///
/// Every [`WaitRequest`](crate::WaitRequest) carries its own explicit
/// timeout; the configured default feeds only the
/// [`submit_with_default`](crate::WaitBroker::submit_with_default)
/// convenience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Timeout for requests submitted without one.
    pub default_timeout: Duration,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl BrokerConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_timeout.is_zero() {
            return Err(ConfigError::ZeroDefaultTimeout);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A zero default would fail every defaulted request on arrival.
    #[error("default_timeout cannot be zero")]
    ZeroDefaultTimeout,
}
