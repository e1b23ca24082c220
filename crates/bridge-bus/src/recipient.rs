//! Addressable recipient handles and their mailboxes.

use crate::envelope::Envelope;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Errors from a timed `ask` round trip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AskError {
    /// The target's mailbox is closed (the receiving side is gone).
    #[error("target unreachable (mailbox closed)")]
    Unreachable,

    /// The target received the request but dropped the reply handle without
    /// answering.
    #[error("target discarded the request without replying")]
    Dropped,

    /// No reply arrived within the deadline.
    #[error("no reply within {timeout:?}")]
    Timeout { timeout: Duration },
}

/// Error from a fire-and-forget `send` to a closed mailbox.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("mailbox closed")]
pub struct MailboxClosed;

/// Create a connected recipient/mailbox pair.
///
/// `name` is diagnostic only; it appears in log fields and `Debug` output.
pub fn mailbox<Req, Resp>(
    name: impl Into<Arc<str>>,
    capacity: usize,
) -> (Recipient<Req, Resp>, Mailbox<Req, Resp>) {
    let name = name.into();
    let (tx, rx) = mpsc::channel(capacity);
    (
        Recipient {
            name: name.clone(),
            tx,
        },
        Mailbox { name, rx },
    )
}

/// Cloneable handle for delivering messages to one addressable target.
pub struct Recipient<Req, Resp> {
    name: Arc<str>,
    tx: mpsc::Sender<Envelope<Req, Resp>>,
}

// Manual impl: `Req`/`Resp` need not be `Clone` for the handle to be.
impl<Req, Resp> Clone for Recipient<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            tx: self.tx.clone(),
        }
    }
}

impl<Req, Resp> Recipient<Req, Resp> {
    /// Diagnostic name of the target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the receiving side has gone away.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Fire-and-forget delivery. Waits for mailbox capacity but not for any
    /// kind of acknowledgement.
    pub async fn send(&self, payload: Req) -> Result<(), MailboxClosed> {
        self.tx
            .send(Envelope::new(payload, None))
            .await
            .map_err(|_| MailboxClosed)
    }

    /// Request/reply with a deadline.
    ///
    /// The deadline covers the whole round trip: delivery into the mailbox
    /// and the wait for the reply. Three failure shapes:
    ///
    /// - [`AskError::Unreachable`] - the mailbox is closed
    /// - [`AskError::Dropped`] - the target discarded the request; surfaced
    ///   immediately rather than after the deadline
    /// - [`AskError::Timeout`] - the deadline elapsed without a reply
    pub async fn ask(&self, payload: Req, timeout: Duration) -> Result<Resp, AskError> {
        let (reply_tx, reply_rx) = oneshot::channel();

        let round_trip = async {
            self.tx
                .send(Envelope::new(payload, Some(reply_tx)))
                .await
                .map_err(|_| AskError::Unreachable)?;
            reply_rx.await.map_err(|_| AskError::Dropped)
        };

        match tokio::time::timeout(timeout, round_trip).await {
            Ok(outcome) => outcome,
            Err(_) => {
                debug!(recipient = %self.name, timeout_ms = timeout.as_millis() as u64, "ask deadline elapsed");
                Err(AskError::Timeout { timeout })
            }
        }
    }
}

impl<Req, Resp> fmt::Debug for Recipient<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipient")
            .field("name", &self.name)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Receiving half of an addressable target.
pub struct Mailbox<Req, Resp> {
    name: Arc<str>,
    rx: mpsc::Receiver<Envelope<Req, Resp>>,
}

impl<Req, Resp> Mailbox<Req, Resp> {
    /// Diagnostic name of the target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Receive the next envelope.
    ///
    /// Returns `None` once every [`Recipient`] handle has been dropped and
    /// the mailbox is drained.
    pub async fn recv(&mut self) -> Option<Envelope<Req, Resp>> {
        self.rx.recv().await
    }

    /// Number of envelopes waiting in the mailbox.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether the mailbox is currently empty.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

impl<Req, Resp> fmt::Debug for Mailbox<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mailbox")
            .field("name", &self.name)
            .field("queued", &self.len())
            .finish()
    }
}
