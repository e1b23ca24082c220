//! Hand-driven processor stand-in for tests.

use crate::recipient::{mailbox, Mailbox, Recipient};
use crate::DEFAULT_MAILBOX_CAPACITY;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// How long [`ProcessorProbe::expect_message`] waits before giving up.
const EXPECT_TIMEOUT: Duration = Duration::from_secs(3);

/// A processor the test drives by hand.
///
/// Unlike [`spawn_processor`](crate::spawn_processor), nothing is answered
/// automatically: delivered payloads queue in the mailbox until the test
/// drains them with [`expect_message`](Self::expect_message), and asks are
/// answered only when the test calls [`reply`](Self::reply). Fire-and-forget
/// deliveries are drained the same way but leave nothing to reply to.
///
/// Methods panic on violated expectations, keeping test bodies to the
/// happy-path assertions.
pub struct ProcessorProbe<Req, Resp> {
    recipient: Recipient<Req, Resp>,
    mb: Mailbox<Req, Resp>,
    pending_replies: VecDeque<oneshot::Sender<Resp>>,
}

impl<Req, Resp> ProcessorProbe<Req, Resp> {
    /// Create a probe with its own mailbox.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let (recipient, mb) = mailbox(name, DEFAULT_MAILBOX_CAPACITY);
        Self {
            recipient,
            mb,
            pending_replies: VecDeque::new(),
        }
    }

    /// Addressable handle for this probe.
    pub fn recipient(&self) -> Recipient<Req, Resp> {
        self.recipient.clone()
    }

    /// Whether undrained messages are waiting in the mailbox.
    pub fn has_messages(&self) -> bool {
        !self.mb.is_empty()
    }

    /// Drain the next message and return its payload.
    ///
    /// If the message was an ask, its reply handle is queued for
    /// [`reply`](Self::reply).
    ///
    /// # Panics
    ///
    /// If no message arrives within 3 seconds.
    pub async fn expect_message(&mut self) -> Req {
        let envelope = match tokio::time::timeout(EXPECT_TIMEOUT, self.mb.recv()).await {
            Ok(Some(envelope)) => envelope,
            Ok(None) => panic!("probe '{}': mailbox closed", self.mb.name()),
            Err(_) => panic!(
                "probe '{}': no message within {:?}",
                self.mb.name(),
                EXPECT_TIMEOUT
            ),
        };

        let (payload, reply_to) = envelope.into_parts();
        if let Some(tx) = reply_to {
            self.pending_replies.push_back(tx);
        }
        payload
    }

    /// Answer the oldest drained ask.
    ///
    /// Returns `false` if the asker has stopped waiting.
    ///
    /// # Panics
    ///
    /// If no drained ask is awaiting a reply.
    pub fn reply(&mut self, response: Resp) -> bool {
        match self.pending_replies.pop_front() {
            Some(tx) => tx.send(response).is_ok(),
            None => panic!("probe '{}': no pending ask to reply to", self.mb.name()),
        }
    }

    /// Number of drained asks still awaiting a reply.
    pub fn pending_reply_count(&self) -> usize {
        self.pending_replies.len()
    }
}
