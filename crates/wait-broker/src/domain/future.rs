//! Write-once result slot: one writer, many readers.
//!
//! [`result_slot`] creates a connected [`ResultPromise`]/[`ResultFuture`]
//! pair. The promise is the single writer; the future (and every clone of
//! it) is a reader. Settlement is a one-time monotonic transition: once a
//! result is in the slot it never changes, so a reader that checks after
//! waiting can never miss it and repeated reads always agree.
//!
//! Settling twice is a programming error. The non-consuming
//! [`ResultPromise::try_settle`] reports it as [`AlreadySettled`] and leaves
//! the first result untouched; the consuming [`ResultPromise::settle`] (and
//! [`succeed`](ResultPromise::succeed)/[`fail`](ResultPromise::fail)) treat
//! it as fatal and panic. Nothing ever silently overwrites a settled slot.

use crate::domain::errors::WaitError;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Notify;
use tracing::warn;

/// Error from [`ResultPromise::try_settle`] when the slot already holds a
/// result.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("result slot already settled")]
pub struct AlreadySettled;

struct Slot<T> {
    cell: Mutex<Option<Result<T, WaitError>>>,
    settled: Notify,
}

/// Create a connected promise/future pair for one request's result.
pub fn result_slot<T>() -> (ResultPromise<T>, ResultFuture<T>) {
    let slot = Arc::new(Slot {
        cell: Mutex::new(None),
        settled: Notify::new(),
    });
    (
        ResultPromise { slot: slot.clone() },
        ResultFuture { slot },
    )
}

/// Writer half of a result slot. Not cloneable: exactly one writer exists.
///
/// Dropping the promise without settling fails the future with
/// [`WaitError::ProcessorFailed`] instead of stranding its readers.
pub struct ResultPromise<T> {
    slot: Arc<Slot<T>>,
}

impl<T> ResultPromise<T> {
    /// Attempt to settle without consuming the promise.
    ///
    /// Rejects a second settlement, leaving the first result untouched.
    pub fn try_settle(&self, result: Result<T, WaitError>) -> Result<(), AlreadySettled> {
        {
            let mut cell = self.slot.cell.lock();
            if cell.is_some() {
                return Err(AlreadySettled);
            }
            *cell = Some(result);
        }
        self.slot.settled.notify_waiters();
        Ok(())
    }

    /// Settle the slot.
    ///
    /// # Panics
    ///
    /// If the slot is already settled.
    pub fn settle(self, result: Result<T, WaitError>) {
        if self.try_settle(result).is_err() {
            panic!("result slot settled twice");
        }
    }

    /// Settle with the processor's reply.
    pub fn succeed(self, value: T) {
        self.settle(Ok(value));
    }

    /// Settle with a failure.
    pub fn fail(self, error: WaitError) {
        self.settle(Err(error));
    }

    /// Whether the slot has been settled.
    pub fn is_settled(&self) -> bool {
        self.slot.cell.lock().is_some()
    }
}

impl<T> Drop for ResultPromise<T> {
    fn drop(&mut self) {
        let abandoned = Err(WaitError::ProcessorFailed {
            reason: "forwarder terminated without settling".to_string(),
        });
        if self.try_settle(abandoned).is_ok() {
            warn!("result promise dropped before settlement; failing the future");
        }
    }
}

impl<T> fmt::Debug for ResultPromise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultPromise")
            .field("settled", &self.is_settled())
            .finish()
    }
}

/// Reader handle for one request's eventual result.
///
/// Cheap to clone; every clone observes the same settlement.
pub struct ResultFuture<T> {
    slot: Arc<Slot<T>>,
}

// Manual impl: `T` need not be `Clone` for the handle to be.
impl<T> Clone for ResultFuture<T> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T> ResultFuture<T> {
    /// Whether a result (success or failure) is in the slot.
    pub fn is_settled(&self) -> bool {
        self.slot.cell.lock().is_some()
    }

    /// Whether the slot holds a failure. `false` while unsettled.
    pub fn is_failed(&self) -> bool {
        matches!(&*self.slot.cell.lock(), Some(Err(_)))
    }
}

impl<T: Clone> ResultFuture<T> {
    /// Non-blocking read: `None` until settled.
    pub fn try_result(&self) -> Option<Result<T, WaitError>> {
        self.slot.cell.lock().clone()
    }

    /// Wait for settlement and return the result.
    ///
    /// Safe to call at any point after submission: settlement is checked
    /// after registering for the wake-up, so a result can never slip through
    /// between the check and the wait.
    pub async fn result(&self) -> Result<T, WaitError> {
        loop {
            let settled = self.slot.settled.notified();
            tokio::pin!(settled);
            settled.as_mut().enable();

            if let Some(result) = self.try_result() {
                return result;
            }
            settled.await;
        }
    }
}

impl<T> fmt::Debug for ResultFuture<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultFuture")
            .field("settled", &self.is_settled())
            .field("failed", &self.is_failed())
            .finish()
    }
}
