//! Broker counters.
//!
//! Observational only: control flow never consults these.

use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome counters across all requests seen by one broker.
#[derive(Debug, Default)]
pub struct BrokerStats {
    /// Requests accepted by `submit`.
    pub submitted: AtomicU64,
    /// Futures settled with a processor reply.
    pub succeeded: AtomicU64,
    /// Futures settled with a timeout failure.
    pub timed_out: AtomicU64,
    /// Futures settled with a non-timeout failure.
    pub failed: AtomicU64,
}

impl BrokerStats {
    /// Consistent-enough point-in-time copy of the counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Plain-value copy of [`BrokerStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub submitted: u64,
    pub succeeded: u64,
    pub timed_out: u64,
    pub failed: u64,
}

impl StatsSnapshot {
    /// Requests whose future has been settled, by any outcome.
    pub fn settled(&self) -> u64 {
        self.succeeded + self.timed_out + self.failed
    }

    /// Requests submitted but not yet settled.
    pub fn in_flight(&self) -> u64 {
        self.submitted.saturating_sub(self.settled())
    }
}
