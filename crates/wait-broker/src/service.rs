//! Broker service: accepts wait requests and hands out result futures.

use crate::domain::config::BrokerConfig;
use crate::domain::future::{result_slot, ResultFuture};
use crate::domain::request::WaitRequest;
use crate::domain::stats::{BrokerStats, StatsSnapshot};
use crate::forwarder;
use bridge_bus::Recipient;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::debug;

/// Stateless dispatcher: turns a [`WaitRequest`] into a [`ResultFuture`] and
/// fire-and-forgets the round trip to a fresh forwarder task.
///
/// The broker holds no per-request state; concurrent submissions share
/// nothing but the stats counters, so there is no limit on outstanding
/// requests beyond the runtime's own resources. Timeouts and processor
/// failures never surface here - they settle the returned future.
///
/// There is no way to cancel a request once submitted: dropping every clone
/// of the returned future lets the forwarder run to its natural outcome and
/// settle an unobserved slot.
pub struct WaitBroker {
    config: BrokerConfig,
    stats: Arc<BrokerStats>,
}

impl WaitBroker {
    /// Broker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BrokerConfig::default())
    }

    pub fn with_config(config: BrokerConfig) -> Self {
        Self {
            config,
            stats: Arc::new(BrokerStats::default()),
        }
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Accept a request and return the future for its eventual result.
    ///
    /// Returns synchronously: the slot is created and the forwarder spawned
    /// before the caller gets the future back, so the caller can start
    /// waiting immediately and can never miss the settlement.
    ///
    /// # Panics
    ///
    /// Must be called within a Tokio runtime.
    pub fn submit<Req, Resp>(&self, request: WaitRequest<Req, Resp>) -> ResultFuture<Resp>
    where
        Req: Send + 'static,
        Resp: Send + 'static,
    {
        let (promise, future) = result_slot();

        self.stats.submitted.fetch_add(1, Ordering::Relaxed);
        debug!(
            request_id = %request.id(),
            processor = request.target().name(),
            timeout_ms = request.timeout().as_millis() as u64,
            "accepted wait request"
        );

        tokio::spawn(forwarder::run(request, promise, Arc::clone(&self.stats)));
        future
    }

    /// Submit against `target` with the configured default timeout.
    pub fn submit_with_default<Req, Resp>(
        &self,
        target: Recipient<Req, Resp>,
        payload: Req,
    ) -> ResultFuture<Resp>
    where
        Req: Send + 'static,
        Resp: Send + 'static,
    {
        let timeout = self.config.default_timeout;
        self.submit(WaitRequest::new(target, payload, timeout))
    }

    /// Point-in-time copy of the outcome counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }
}

impl Default for WaitBroker {
    fn default() -> Self {
        Self::new()
    }
}
