//! Message envelope carried through a mailbox.

use std::fmt;
use tokio::sync::oneshot;

/// One message delivered to a mailbox: the request payload plus an optional
/// reply handle.
///
/// `ask` deliveries carry a `oneshot` sender the processor replies on;
/// `send` deliveries carry none.
pub struct Envelope<Req, Resp> {
    payload: Req,
    reply_to: Option<oneshot::Sender<Resp>>,
}

impl<Req, Resp> Envelope<Req, Resp> {
    pub(crate) fn new(payload: Req, reply_to: Option<oneshot::Sender<Resp>>) -> Self {
        Self { payload, reply_to }
    }

    /// Borrow the request payload.
    pub fn payload(&self) -> &Req {
        &self.payload
    }

    /// Whether the sender is waiting for a reply.
    pub fn expects_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    /// Reply to the sender, consuming the envelope.
    ///
    /// Returns `false` if no reply was expected or the asker has stopped
    /// waiting (deadline elapsed, handle dropped).
    pub fn reply(self, response: Resp) -> bool {
        match self.reply_to {
            Some(tx) => tx.send(response).is_ok(),
            None => false,
        }
    }

    /// Split into payload and reply handle.
    ///
    /// Dropping the reply handle without sending tells the asker the request
    /// was discarded.
    pub fn into_parts(self) -> (Req, Option<oneshot::Sender<Resp>>) {
        (self.payload, self.reply_to)
    }
}

impl<Req: fmt::Debug, Resp> fmt::Debug for Envelope<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("payload", &self.payload)
            .field("expects_reply", &self.expects_reply())
            .finish()
    }
}
