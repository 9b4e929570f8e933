//! Single-assignment handle for a task's outcome.

use std::sync::Arc;
use std::time::Duration;

use crate::error::WorkFault;
use crate::{Condvar, Mutex};

/// A waitable slot for the output of one [`Executor::post_with_result`]
/// call.
///
/// Unlike the keyed result table a multi-tenant pool would need, a handle
/// here owns exactly one slot: it is created alongside the work item it
/// belongs to and discarded once its value is taken. `clone()` is cheap
/// (it clones the `Arc` inside) and every clone observes the same value.
///
/// The slot holds a `Result` rather than a bare value because the work
/// item behind it can panic: the handle always becomes ready, with
/// [`WorkFault`] standing in for the value a panicking item never
/// produced, so a waiter can never hang on a faulting task.
pub struct ResultHandle<T> {
    inner: Arc<(Mutex<Option<Result<T, WorkFault>>>, Condvar)>,
}

impl<T> Clone for ResultHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + 'static> ResultHandle<T> {
    /// Creates a fresh, empty handle.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new((Mutex::new(None), Condvar::new())),
        }
    }

    /// Fills the slot with a successful value and wakes any blocked
    /// waiter.
    ///
    /// Called at most once per handle, from the worker thread that ran the
    /// task. A second call silently overwrites the first; nothing in this
    /// crate does that, but it is not treated as an error here either.
    pub fn fulfill(&self, value: T) {
        self.fulfill_outcome(Ok(value));
    }

    /// Fills the slot with a fault, as when the work item behind this
    /// handle panicked instead of returning.
    pub fn fulfill_fault(&self, fault: WorkFault) {
        self.fulfill_outcome(Err(fault));
    }

    fn fulfill_outcome(&self, outcome: Result<T, WorkFault>) {
        let mut slot = self.inner.0.lock();
        *slot = Some(outcome);
        self.inner.1.notify_all();
    }

    /// Returns the outcome immediately if it is already present, without
    /// blocking.
    pub fn try_take(&self) -> Option<Result<T, WorkFault>> {
        self.inner.0.lock().take()
    }

    /// Blocks the calling thread until the outcome is available.
    pub fn wait(&self) -> Result<T, WorkFault> {
        let mut slot = self.inner.0.lock();
        loop {
            if let Some(outcome) = slot.take() {
                return outcome;
            }
            self.inner.1.wait(&mut slot);
        }
    }

    /// Blocks until the outcome is available or `timeout` elapses,
    /// whichever comes first.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Result<T, WorkFault>> {
        let mut slot = self.inner.0.lock();
        let deadline = std::time::Instant::now() + timeout;
        loop {
            if let Some(outcome) = slot.take() {
                return Some(outcome);
            }
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }
            let result = self.inner.1.wait_for(&mut slot, remaining);
            if result.timed_out() {
                return slot.take();
            }
        }
    }
}

impl<T: Send + 'static> Default for ResultHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}
