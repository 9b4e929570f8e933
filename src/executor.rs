//! The composing public surface: runner lifecycle, immediate dispatch, and
//! timer-backed delayed/repeated scheduling.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ExecutorConfig;
use crate::error::ExecutorError;
use crate::ids::{RepeatId, RunnerTag};
use crate::registry::RunnerRegistry;
use crate::result_handle::ResultHandle;
use crate::timer::Timer;
use crate::work_item::WorkItem;

/// Composes a [`RunnerRegistry`] and a [`Timer`] behind one surface.
///
/// The timer never runs user work itself: `post_delayed` and
/// `post_repeated` wrap the caller's work in a closure that re-enters
/// [`Executor::post`] on the target pool when the deadline fires, so a slow
/// callback can never delay a later fire.
pub struct Executor {
    registry: RunnerRegistry,
    timer: Timer,
    config: ExecutorConfig,
}

impl Executor {
    /// Builds an executor with its own registry and timer, using `config`
    /// for the timer's helper pool and new runners' default size.
    ///
    /// Neither the timer nor any runner pool is running yet: the timer is
    /// lazily started on its first `post_delayed`/`post_repeated` call,
    /// and a runner pool is started as soon as [`add_runner`](Self::add_runner)
    /// creates it.
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            registry: RunnerRegistry::new(),
            timer: Timer::new(config.timer_helper_pool_size, config.worker_stack_size),
            config,
        }
    }

    /// Creates a new runner pool sized per configuration and returns its
    /// tag.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::SpawnFailure`] if the pool's worker
    /// threads cannot be spawned.
    pub fn add_runner(&self) -> Result<RunnerTag, ExecutorError> {
        self.registry.add_runner(&self.config)
    }

    /// Submits `work` to the pool named by `tag`, fire-and-forget.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::UnknownRunnerTag`] if `tag` was never
    /// issued, or [`ExecutorError::NotRunning`] if its pool has been
    /// stopped.
    pub fn post(&self, tag: RunnerTag, work: WorkItem) -> Result<(), ExecutorError> {
        self.registry.get(tag)?.submit(work)
    }

    /// Submits `f` to the pool named by `tag` and returns a handle that
    /// resolves to its return value.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::UnknownRunnerTag`] if `tag` was never
    /// issued, or [`ExecutorError::NotRunning`] if its pool has been
    /// stopped.
    pub fn post_with_result<T, F>(&self, tag: RunnerTag, f: F) -> Result<ResultHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        self.registry.get(tag)?.submit_with_result(f)
    }

    /// Schedules `work` to run once on `tag`'s pool, after `delay`.
    ///
    /// `tag` is validated immediately: an unknown tag is rejected here,
    /// not when the timer eventually fires. Ensures the timer is started,
    /// which is a no-op after the first call.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::UnknownRunnerTag`] if `tag` was never
    /// issued, or [`ExecutorError::SpawnFailure`] if the timer is not yet
    /// running and its helper pool or scheduler thread cannot be spawned.
    pub fn post_delayed(&self, tag: RunnerTag, work: WorkItem, delay: Duration) -> Result<(), ExecutorError> {
        let pool = self.registry.get(tag)?;
        self.timer.start()?;
        self.timer.post_delayed(
            Box::new(move || {
                if let Err(err) = pool.submit(work) {
                    tracing::warn!(error = %err, "delayed work could not be re-posted to its pool");
                }
            }),
            delay,
        );
        Ok(())
    }

    /// Schedules `work` to run on `tag`'s pool every `interval`, up to
    /// `count` times, and returns the id used to cancel it early.
    ///
    /// `tag` is validated immediately, the same as
    /// [`post_delayed`](Self::post_delayed), which also ensures the timer
    /// is started.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::UnknownRunnerTag`] if `tag` was never
    /// issued, or [`ExecutorError::SpawnFailure`] if the timer is not yet
    /// running and its helper pool or scheduler thread cannot be spawned.
    pub fn post_repeated<F>(&self, tag: RunnerTag, work: F, interval: Duration, count: u32) -> Result<RepeatId, ExecutorError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let pool = self.registry.get(tag)?;
        self.timer.start()?;
        let work = Arc::new(work);
        let id = self.timer.post_repeated(
            move || {
                let work = Arc::clone(&work);
                if let Err(err) = pool.submit(Box::new(move || work())) {
                    tracing::warn!(error = %err, "repeated work could not be re-posted to its pool");
                }
            },
            interval,
            count,
        );
        Ok(id)
    }

    /// Cancels a repeated schedule; a no-op if `id` is unknown or already
    /// terminal.
    pub fn cancel_repeated(&self, id: RepeatId) {
        self.timer.cancel_repeated(id);
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.timer.stop();
        self.registry.shutdown_all();
    }
}
