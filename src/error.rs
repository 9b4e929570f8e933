//! Synchronous, call-site errors.
//!
//! Faults that occur *inside* a submitted work item never surface here:
//! for a fire-and-forget `post` they are logged with [`tracing::warn!`]
//! and otherwise swallowed, while `post_with_result`/`submit_with_result`
//! deliver them through the caller's [`crate::ResultHandle`] as a
//! [`WorkFault`]. This enum covers only mistakes a caller can make before
//! a task ever reaches a worker thread.

use thiserror::Error;

use crate::RunnerTag;

/// Errors returned directly from [`crate::Executor`] methods.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// The given [`RunnerTag`] was never issued by
    /// [`Executor::add_runner`](crate::Executor::add_runner).
    #[error("unknown runner tag: {0:?}")]
    UnknownRunnerTag(RunnerTag),
    /// The target pool exists but has already been shut down.
    #[error("runner is not running")]
    NotRunning,
    /// The OS refused to spawn a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    SpawnFailure(#[from] std::io::Error),
}

/// A work item submitted through `submit_with_result`/`post_with_result`
/// panicked instead of returning a value.
///
/// Carries a best-effort description of the panic payload, not the
/// payload itself: `Box<dyn Any + Send>` is not `Clone`, and a
/// [`crate::ResultHandle`] may have more than one waiter. Modelled on the
/// teacher's own `PoolError::Internal(String)` ("internal error: worker
/// thread panic, channel closed, etc.") in `src/core/worker_pool.rs`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("work item panicked: {0}")]
pub struct WorkFault(String);

impl WorkFault {
    /// Builds a fault from a caught [`std::panic::catch_unwind`] payload.
    pub(crate) fn from_panic_payload(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self(message)
    }

    /// The panic's description, as recovered from its payload.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}
