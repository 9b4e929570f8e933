//! Process-wide access point owning the one [`Executor`] a process needs.

use crate::config::ExecutorConfig;
use crate::error::ExecutorError;
use crate::ids::RunnerTag;
use crate::{Executor, OnceCell};

static EXECUTOR: OnceCell<Executor> = OnceCell::new();
static CONFIG: OnceCell<ExecutorConfig> = OnceCell::new();

/// Process-wide singleton wrapping the lazily-constructed [`Executor`].
///
/// There is exactly one logical instance per process: [`Context::instance`]
/// always returns a handle to the same underlying [`Executor`], constructed
/// by whichever thread calls it first. There is no re-initialization
/// operation; call [`Context::configure`] before the first access if the
/// default [`ExecutorConfig`] does not fit.
#[derive(Debug, Clone, Copy)]
pub struct Context;

impl Context {
    /// Returns the process-wide context, constructing the underlying
    /// executor on the first call.
    ///
    /// Construction itself cannot fail: it builds an empty
    /// [`RunnerRegistry`](crate::RunnerRegistry) and a not-yet-started
    /// [`Timer`](crate::Timer), neither of which spawns a thread until a
    /// runner is added or work is scheduled. Call
    /// [`Context::create_runner`] to surface a thread spawn failure.
    #[must_use]
    pub fn instance() -> Self {
        EXECUTOR.get_or_init(|| {
            let config = CONFIG.get_or_init(ExecutorConfig::default).clone();
            Executor::new(config)
        });
        Self
    }

    /// Supplies the [`ExecutorConfig`] used to construct the executor.
    ///
    /// Only the first call before [`Context::instance`] is first reached
    /// has any effect; later calls, or calls after the executor already
    /// exists, are silently ignored, matching the teacher's `OnceCell`
    /// "first writer wins" semantics.
    pub fn configure(config: ExecutorConfig) {
        let _ = CONFIG.set(config);
    }

    /// Returns a reference to the owned [`Executor`].
    #[must_use]
    pub fn executor(&self) -> &'static Executor {
        EXECUTOR.get().expect("Context::instance always initializes EXECUTOR first")
    }

    /// Convenience for `self.executor().add_runner()`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::SpawnFailure`] if the pool's worker threads
    /// cannot be spawned.
    pub fn create_runner(&self) -> Result<RunnerTag, ExecutorError> {
        self.executor().add_runner()
    }
}
