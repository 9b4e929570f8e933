//! Fixed-size worker pool: one shared FIFO, `N` named OS threads draining it.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{ExecutorError, WorkFault};
use crate::result_handle::ResultHandle;
use crate::work_item::WorkItem;
use crate::{Condvar, Mutex};

/// A point-in-time snapshot of a pool's activity.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of worker threads owned by the pool.
    pub worker_count: usize,
    /// Items currently sitting in the FIFO, not yet picked up.
    pub queued_tasks: u64,
    /// Items a worker is actively running right now.
    pub active_tasks: u64,
    /// Items that ran to completion without panicking.
    pub completed_tasks: u64,
    /// Items whose closure panicked.
    pub failed_tasks: u64,
    /// Total items ever accepted by [`WorkerPool::submit`].
    pub submitted_tasks: u64,
}

#[derive(Debug, Default)]
struct PoolCounters {
    queued_tasks: AtomicU64,
    active_tasks: AtomicU64,
    completed_tasks: AtomicU64,
    failed_tasks: AtomicU64,
    submitted_tasks: AtomicU64,
}

impl PoolCounters {
    fn snapshot(&self, worker_count: usize) -> PoolStats {
        PoolStats {
            worker_count,
            queued_tasks: self.queued_tasks.load(Ordering::Relaxed),
            active_tasks: self.active_tasks.load(Ordering::Relaxed),
            completed_tasks: self.completed_tasks.load(Ordering::Relaxed),
            failed_tasks: self.failed_tasks.load(Ordering::Relaxed),
            submitted_tasks: self.submitted_tasks.load(Ordering::Relaxed),
        }
    }
}

type Fifo = Arc<(Mutex<VecDeque<WorkItem>>, Condvar)>;

/// A named pool of `N` worker threads draining one shared FIFO.
///
/// A freshly constructed pool is not yet running: [`WorkerPool::new`] only
/// records its configuration, and no worker thread exists until
/// [`WorkerPool::start`] is called. Workers block on the shared condition
/// variable rather than polling; submitting a work item wakes exactly one
/// of them. A worker that panics while running a work item is caught with
/// [`panic::catch_unwind`] and logged — it never takes down the pool or
/// any other worker.
pub struct WorkerPool {
    name: String,
    worker_count: usize,
    stack_size: usize,
    queue: Fifo,
    running: Arc<AtomicBool>,
    counters: Arc<PoolCounters>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl WorkerPool {
    /// Builds a pool configured for `worker_count` named threads of
    /// `stack_size` bytes each. The pool is not yet running; call
    /// [`start`](Self::start) to spawn its worker threads.
    #[must_use]
    pub fn new(name: impl Into<String>, worker_count: usize, stack_size: usize) -> Self {
        Self {
            name: name.into(),
            worker_count,
            stack_size,
            queue: Arc::new((Mutex::new(VecDeque::new()), Condvar::new())),
            running: Arc::new(AtomicBool::new(false)),
            counters: Arc::new(PoolCounters::default()),
            workers: Mutex::new(Vec::new()),
        }
    }

    /// Spawns this pool's `worker_count` named threads, each with
    /// `stack_size` bytes of stack, all draining the same FIFO.
    ///
    /// Threads are named `"{name}-worker{id}"`, which is what shows up in a
    /// panic message or a debugger's thread list.
    ///
    /// Idempotent: if the pool is already running, this spawns nothing and
    /// returns `Ok(false)`. Otherwise it spawns every worker thread and
    /// returns `Ok(true)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::SpawnFailure`] if the OS refuses to create
    /// one of the threads; any threads already spawned for this call are
    /// torn down and the pool is left not running.
    pub fn start(&self) -> Result<bool, ExecutorError> {
        if self.running.swap(true, Ordering::AcqRel) {
            return Ok(false);
        }

        let mut workers = self.workers.lock();
        for worker_id in 0..self.worker_count {
            match spawn_worker(self.name.clone(), worker_id, Arc::clone(&self.queue), Arc::clone(&self.running), Arc::clone(&self.counters), self.stack_size) {
                Ok(handle) => workers.push(handle),
                Err(err) => {
                    self.running.store(false, Ordering::SeqCst);
                    self.queue.1.notify_all();
                    for handle in workers.drain(..) {
                        let _ = handle.join();
                    }
                    return Err(ExecutorError::SpawnFailure(err));
                }
            }
        }

        info!(pool = %self.name, worker_count = self.worker_count, "worker pool started");
        Ok(true)
    }

    /// Queues a fire-and-forget work item.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::NotRunning`] if the pool has already been
    /// shut down.
    pub fn submit(&self, item: WorkItem) -> Result<(), ExecutorError> {
        if !self.running.load(Ordering::Acquire) {
            return Err(ExecutorError::NotRunning);
        }
        self.counters.submitted_tasks.fetch_add(1, Ordering::Relaxed);
        self.counters.queued_tasks.fetch_add(1, Ordering::Relaxed);
        self.queue.0.lock().push_back(item);
        self.queue.1.notify_one();
        Ok(())
    }

    /// Queues a work item and returns a handle that resolves to its return
    /// value once a worker runs it, or to a [`WorkFault`] if `f` panics.
    ///
    /// The handle always becomes ready: a panic inside `f` is caught here,
    /// before it ever reaches [`spawn_worker`]'s own fault isolation, so a
    /// caller blocked in [`ResultHandle::wait`] is never left hanging. The
    /// panic is then resumed so the pool's own counters and logging still
    /// see it as a failed task, the same as a plain `submit`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::NotRunning`] if the pool has already been
    /// shut down.
    pub fn submit_with_result<T, F>(&self, f: F) -> Result<ResultHandle<T>, ExecutorError>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let handle = ResultHandle::new();
        let returned = handle.clone();
        self.submit(Box::new(move || match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => returned.fulfill(value),
            Err(payload) => {
                returned.fulfill_fault(WorkFault::from_panic_payload(&*payload));
                panic::resume_unwind(payload);
            }
        }))?;
        Ok(handle)
    }

    /// Returns a snapshot of this pool's counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.counters.snapshot(self.workers.lock().len())
    }

    /// Stops accepting new work, wakes every idle worker, and joins each
    /// worker thread with a two-second timeout.
    ///
    /// A worker still running a work item past its timeout is detached
    /// rather than waited on forever; it finishes (or panics) on its own
    /// and exits once it next checks the running flag.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        self.queue.1.notify_all();

        let mut workers = self.workers.lock();
        let worker_count = workers.len();
        for (idx, worker) in workers.drain(..).enumerate() {
            let (tx, rx) = std::sync::mpsc::channel();
            let joiner = thread::spawn(move || {
                let joined = worker.join().is_ok();
                let _ = tx.send(joined);
            });
            match rx.recv_timeout(Duration::from_secs(2)) {
                Ok(true) => debug!(pool = %self.name, worker_id = idx, "worker joined"),
                Ok(false) => warn!(pool = %self.name, worker_id = idx, "worker panicked during shutdown"),
                Err(_) => warn!(pool = %self.name, worker_id = idx, "worker did not exit in time, detaching"),
            }
            let _ = joiner.join();
        }
        info!(pool = %self.name, worker_count, "worker pool shut down");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }
        self.queue.1.notify_all();
        debug!(pool = %self.name, "worker pool dropped without explicit shutdown, workers detached");
    }
}

fn spawn_worker(
    pool_name: String,
    worker_id: usize,
    queue: Fifo,
    running: Arc<AtomicBool>,
    counters: Arc<PoolCounters>,
    stack_size: usize,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("{pool_name}-worker{worker_id}"))
        .stack_size(stack_size)
        .spawn(move || {
            debug!(pool = pool_name, worker_id, "worker thread started");
            loop {
                let item = {
                    let (mutex, condvar) = &*queue;
                    let mut items = mutex.lock();
                    loop {
                        if let Some(item) = items.pop_front() {
                            break Some(item);
                        }
                        if !running.load(Ordering::Acquire) {
                            break None;
                        }
                        condvar.wait(&mut items);
                    }
                };

                let Some(item) = item else {
                    break;
                };

                counters.queued_tasks.fetch_sub(1, Ordering::Relaxed);
                counters.active_tasks.fetch_add(1, Ordering::Relaxed);

                let outcome = panic::catch_unwind(AssertUnwindSafe(item));

                counters.active_tasks.fetch_sub(1, Ordering::Relaxed);
                match outcome {
                    Ok(()) => {
                        counters.completed_tasks.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(_) => {
                        counters.failed_tasks.fetch_add(1, Ordering::Relaxed);
                        warn!(pool = pool_name, worker_id, "work item panicked");
                    }
                }
            }
            debug!(pool = pool_name, worker_id, "worker thread exiting");
        })
}
