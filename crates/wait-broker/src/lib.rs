//! # Wait Broker - Request/Reply to Future Bridge
//!
//! Converts an actor-style, message-passing request/response exchange into a
//! future-like handle the caller can await, with a per-request timeout and
//! fully isolated handling of each concurrent request.
//!
//! ## Flow
//!
//! ```text
//! ┌──────────┐ submit(WaitRequest)  ┌────────────┐
//! │  Caller  │ ───────────────────▶ │ WaitBroker │── tokio::spawn ──┐
//! │          │ ◀─────────────────── │ (stateless)│                  │
//! └──────────┘    ResultFuture      └────────────┘                  ▼
//!      │                                                   ┌────────────────┐
//!      │ result().await                                    │ Forwarder task │
//!      │                                                   │ (one/request)  │
//!      │                                                   └────────────────┘
//!      │                                                     │ timed ask  ▲
//!      │                                                     ▼            │
//!      │              settle exactly once                 ┌───────────────┐
//!      └◀──────────────────────────────────────────────── │   Processor   │
//!                                                         └───────────────┘
//! ```
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement |
//! |-----------|-------------|
//! | One forwarder per request, never reused | `service.rs` - `submit()` spawns a fresh task per call |
//! | Exactly-once settlement | `domain/future.rs` - `OnceLock` slot; duplicate settle rejected |
//! | Waiting forwarder undisturbed by stray traffic | `forwarder.rs` - plain task, replies on a private oneshot |
//! | No shared mutable state between requests | `service.rs` - broker holds config + counters only |
//! | Settlement happens-before forwarder termination | `forwarder.rs` - settle is the last action before return |
//!
//! Timeouts and processor failures are never raised at `submit`; they are
//! carried as the failure value of the [`ResultFuture`] and observed only by
//! readers of the future.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bridge_bus::spawn_processor_fn;
//! use std::time::Duration;
//! use wait_broker::{WaitBroker, WaitRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let broker = WaitBroker::new();
//!     let processor = spawn_processor_fn("echo", |n: u32| async move { n.to_string() });
//!
//!     let future = broker.submit(WaitRequest::new(
//!         processor,
//!         777,
//!         Duration::from_secs(5),
//!     ));
//!
//!     match future.result().await {
//!         Ok(reply) => println!("processor replied: {reply}"),
//!         Err(error) => println!("request failed: {error}"),
//!     }
//! }
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod domain;
mod forwarder;
pub mod service;

// Re-export main types
pub use domain::config::{BrokerConfig, ConfigError};
pub use domain::errors::WaitError;
pub use domain::future::{result_slot, AlreadySettled, ResultFuture, ResultPromise};
pub use domain::request::{RequestId, WaitRequest};
pub use domain::stats::{BrokerStats, StatsSnapshot};
pub use service::WaitBroker;
