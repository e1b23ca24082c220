//! Per-request forwarder task.
//!
//! One forwarder owns one request's whole lifecycle: issue the timed call to
//! the processor, settle the result slot exactly once, record the outcome,
//! return. The task's return is its termination; there is no shutdown
//! protocol and no reuse.
//!
//! While the call is outstanding the task holds no mailbox, so unrelated
//! traffic cannot reach it; the reply arrives on a private oneshot channel
//! inside the `ask`. A slow or dead processor affects only this task and
//! this future.

use crate::domain::errors::WaitError;
use crate::domain::future::ResultPromise;
use crate::domain::request::WaitRequest;
use crate::domain::stats::BrokerStats;
use bridge_bus::AskError;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// Run one request to completion.
///
/// Settlement happens-before return on every path.
pub(crate) async fn run<Req, Resp>(
    request: WaitRequest<Req, Resp>,
    promise: ResultPromise<Resp>,
    stats: Arc<BrokerStats>,
) where
    Req: Send + 'static,
    Resp: Send + 'static,
{
    let (id, target, payload, timeout) = request.into_parts();

    debug!(
        request_id = %id,
        processor = target.name(),
        timeout_ms = timeout.as_millis() as u64,
        "forwarding request to processor"
    );

    match target.ask(payload, timeout).await {
        Ok(response) => {
            stats.succeeded.fetch_add(1, Ordering::Relaxed);
            debug!(request_id = %id, processor = target.name(), "processor replied");
            promise.succeed(response);
        }
        Err(AskError::Timeout { timeout }) => {
            stats.timed_out.fetch_add(1, Ordering::Relaxed);
            warn!(
                request_id = %id,
                processor = target.name(),
                timeout_ms = timeout.as_millis() as u64,
                "processor did not reply in time"
            );
            promise.fail(WaitError::ProcessorTimeout { timeout });
        }
        Err(error) => {
            stats.failed.fetch_add(1, Ordering::Relaxed);
            warn!(
                request_id = %id,
                processor = target.name(),
                error = %error,
                "processor call failed"
            );
            promise.fail(WaitError::from(error));
        }
    }
}
