//! # Bridge Bus - In-Process Request/Reply Substrate
//!
//! Addressable mailboxes for asynchronous message passing between tasks.
//!
//! Every addressable target is a [`Recipient`] handle paired with a
//! [`Mailbox`]. A recipient supports two delivery modes:
//!
//! - `send` - fire-and-forget, no reply expected
//! - `ask` - request/reply with a deadline covering the whole round trip
//!
//! ```text
//! ┌──────────────┐  Envelope { payload, reply_to }   ┌──────────────┐
//! │    Caller    │ ────────────────────────────────▶ │   Mailbox    │
//! │              │                                   │  (processor) │
//! │  awaits the  │ ◀──────────────────────────────── │              │
//! └──────────────┘        oneshot reply              └──────────────┘
//! ```
//!
//! Replies travel on a private `oneshot` channel carried inside the
//! [`Envelope`], so a reply can never be confused with unrelated traffic
//! arriving at either side.
//!
//! Processors can be spawned from a [`Processor`] implementation (or a plain
//! async closure) with [`spawn_processor`] / [`spawn_processor_fn`]. For
//! tests, [`ProcessorProbe`] stands in for a processor and lets the test
//! inspect delivered payloads and reply by hand.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod envelope;
pub mod probe;
pub mod processor;
pub mod recipient;

// Re-export main types
pub use envelope::Envelope;
pub use probe::ProcessorProbe;
pub use processor::{spawn_processor, spawn_processor_fn, Processor};
pub use recipient::{mailbox, AskError, Mailbox, MailboxClosed, Recipient};

/// Default mailbox capacity before senders are backpressured.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 64;
