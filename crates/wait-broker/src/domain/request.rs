//! Wait request description and its identifier.

use bridge_bus::Recipient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identifier for one wait request.
///
/// UUID v7: time-ordered, so log lines for concurrent requests sort by
/// submission time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generate a new request ID (UUID v7).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<RequestId> for Uuid {
    fn from(id: RequestId) -> Self {
        id.0
    }
}

/// Immutable description of one unit of work: where to send the payload and
/// how long to wait for the reply.
///
/// Created by the caller, consumed exactly once by the forwarder spawned for
/// it. A zero timeout is accepted and simply fails the request on the first
/// deadline check.
pub struct WaitRequest<Req, Resp> {
    id: RequestId,
    target: Recipient<Req, Resp>,
    payload: Req,
    timeout: Duration,
}

impl<Req, Resp> WaitRequest<Req, Resp> {
    /// Describe a request against `target` with the given reply deadline.
    pub fn new(target: Recipient<Req, Resp>, payload: Req, timeout: Duration) -> Self {
        Self {
            id: RequestId::new(),
            target,
            payload,
            timeout,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn target(&self) -> &Recipient<Req, Resp> {
        &self.target
    }

    pub fn payload(&self) -> &Req {
        &self.payload
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn into_parts(self) -> (RequestId, Recipient<Req, Resp>, Req, Duration) {
        (self.id, self.target, self.payload, self.timeout)
    }
}

// Manual impl: the payload need not be `Debug` and is deliberately omitted.
impl<Req, Resp> fmt::Debug for WaitRequest<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitRequest")
            .field("id", &self.id)
            .field("target", &self.target.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}
