//! Wait broker error types.
//!
//! These errors are never returned from `submit`; they are carried as the
//! failure value of a settled [`ResultFuture`](crate::ResultFuture) and
//! observed only when a reader inspects it. `Clone + PartialEq` so every
//! reader of the same future observes the identical failure.

use bridge_bus::AskError;
use std::time::Duration;
use thiserror::Error;

/// Failure value of a settled result future.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WaitError {
    /// The processor did not reply within the request's deadline.
    #[error("processor did not reply within {timeout:?}")]
    ProcessorTimeout { timeout: Duration },

    /// The processor call itself failed: unreachable target, request
    /// discarded, or the forwarder died before settling.
    #[error("processor call failed: {reason}")]
    ProcessorFailed { reason: String },
}

impl WaitError {
    /// Whether this failure is a reply deadline expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ProcessorTimeout { .. })
    }
}

impl From<AskError> for WaitError {
    fn from(error: AskError) -> Self {
        match error {
            AskError::Timeout { timeout } => Self::ProcessorTimeout { timeout },
            other => Self::ProcessorFailed {
                reason: other.to_string(),
            },
        }
    }
}
