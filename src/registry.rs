//! Maps an opaque [`RunnerTag`] to the [`WorkerPool`] it names.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ExecutorConfig;
use crate::error::ExecutorError;
use crate::ids::IdSequence;
use crate::{RunnerTag, RwLock, WorkerPool};

/// Owns every named runner pool for one [`crate::Executor`].
///
/// Reads (`get`, on every `post`/`post_with_result` call) are far more
/// frequent than writes (`add_runner`, typically only at startup), so the
/// map sits behind a [`crate::RwLock`] rather than a [`crate::Mutex`].
pub struct RunnerRegistry {
    pools: RwLock<HashMap<RunnerTag, Arc<WorkerPool>>>,
    tags: IdSequence,
}

impl RunnerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            tags: IdSequence::new(),
        }
    }

    /// Creates a new runner pool sized from `config.default_pool_size` and
    /// registers it under a freshly issued tag.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::SpawnFailure`] if the OS refuses to spawn
    /// one of the pool's worker threads.
    pub fn add_runner(&self, config: &ExecutorConfig) -> Result<RunnerTag, ExecutorError> {
        self.add_runner_sized(config.default_pool_size, config.worker_stack_size)
    }

    /// Like [`add_runner`](Self::add_runner), but with an explicit worker
    /// count rather than the configured default.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::SpawnFailure`] if the OS refuses to spawn
    /// one of the pool's worker threads.
    pub fn add_runner_sized(&self, worker_count: usize, stack_size: usize) -> Result<RunnerTag, ExecutorError> {
        let tag = self.tags.next_runner_tag();
        let pool = WorkerPool::new(format!("exec-runner{}", tag.raw()), worker_count, stack_size);
        pool.start()?;
        self.pools.write().insert(tag, Arc::new(pool));
        Ok(tag)
    }

    /// Looks up the pool behind `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::UnknownRunnerTag`] if `tag` was never
    /// issued by this registry.
    pub fn get(&self, tag: RunnerTag) -> Result<Arc<WorkerPool>, ExecutorError> {
        self.pools
            .read()
            .get(&tag)
            .cloned()
            .ok_or(ExecutorError::UnknownRunnerTag(tag))
    }

    /// Shuts down and drops every registered pool.
    pub fn shutdown_all(&self) {
        let pools = self.pools.write();
        for pool in pools.values() {
            pool.stop();
        }
    }
}

impl Default for RunnerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
