//! Processor trait and spawning.

use crate::recipient::{mailbox, Recipient};
use crate::DEFAULT_MAILBOX_CAPACITY;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::oneshot;
use tracing::debug;

/// A unit that turns requests into responses.
///
/// Implementations are driven by a mailbox-drain loop spawned with
/// [`spawn_processor`]; requests are handled one at a time in arrival order.
#[async_trait]
pub trait Processor: Send + Sync + 'static {
    type Request: Send + 'static;
    type Response: Send + 'static;

    async fn handle(&self, request: Self::Request) -> Self::Response;
}

/// Spawn a processor onto its own task and return the addressable handle.
///
/// The task runs until every [`Recipient`] handle has been dropped and the
/// mailbox is drained. A reply that finds its asker already gone (deadline
/// elapsed, handle dropped) is discarded.
///
/// # Panics
///
/// Must be called within a Tokio runtime.
pub fn spawn_processor<P: Processor>(
    name: impl Into<Arc<str>>,
    processor: P,
) -> Recipient<P::Request, P::Response> {
    let name = name.into();
    let (recipient, mut mb) = mailbox(name.clone(), DEFAULT_MAILBOX_CAPACITY);

    tokio::spawn(async move {
        while let Some(envelope) = mb.recv().await {
            let (payload, reply_to) = envelope.into_parts();
            let response = processor.handle(payload).await;
            respond(&name, reply_to, response);
        }
        debug!(processor = %name, "all recipients dropped, processor stopping");
    });

    recipient
}

/// Spawn a processor from a plain async closure.
///
/// # Panics
///
/// Must be called within a Tokio runtime.
pub fn spawn_processor_fn<Req, Resp, F, Fut>(
    name: impl Into<Arc<str>>,
    handler: F,
) -> Recipient<Req, Resp>
where
    Req: Send + 'static,
    Resp: Send + 'static,
    F: Fn(Req) -> Fut + Send + 'static,
    Fut: Future<Output = Resp> + Send,
{
    let name = name.into();
    let (recipient, mut mb) = mailbox(name.clone(), DEFAULT_MAILBOX_CAPACITY);

    tokio::spawn(async move {
        while let Some(envelope) = mb.recv().await {
            let (payload, reply_to) = envelope.into_parts();
            let response = handler(payload).await;
            respond(&name, reply_to, response);
        }
        debug!(processor = %name, "all recipients dropped, processor stopping");
    });

    recipient
}

fn respond<Resp>(name: &str, reply_to: Option<oneshot::Sender<Resp>>, response: Resp) {
    if let Some(tx) = reply_to {
        if tx.send(response).is_err() {
            debug!(processor = %name, "asker gone before reply; discarding response");
        }
    }
}
