//! Domain types: requests, the write-once result slot, errors, config, stats.

pub mod config;
pub mod errors;
pub mod future;
pub mod request;
pub mod stats;

pub use config::{BrokerConfig, ConfigError};
pub use errors::WaitError;
pub use future::{result_slot, AlreadySettled, ResultFuture, ResultPromise};
pub use request::{RequestId, WaitRequest};
pub use stats::{BrokerStats, StatsSnapshot};
