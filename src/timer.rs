//! Deadline timer: one scheduler thread, a min-heap of pending fires, and
//! tombstone-based cancellation of repeated entries.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::error::ExecutorError;
use crate::ids::{IdSequence, RepeatId};
use crate::work_item::WorkItem;
use crate::worker_pool::WorkerPool;
use crate::{Condvar, Mutex};

/// What a popped, due entry actually runs.
enum Action {
    /// Fires exactly once; the closure is consumed on dispatch.
    Once(WorkItem),
    /// Fires repeatedly; each dispatch calls the shared closure again.
    Repeating(Arc<dyn Fn() + Send + Sync>),
}

struct ScheduledEntry {
    deadline: Instant,
    seq: u64,
    repeat_id: u64,
    interval: Duration,
    remaining: u32,
    action: Action,
}

impl PartialEq for ScheduledEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}
impl Eq for ScheduledEntry {}

impl PartialOrd for ScheduledEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEntry {
    // Reversed so a `BinaryHeap<ScheduledEntry>` is a min-heap by deadline,
    // with ties broken by insertion order (lower seq first).
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct TimerState {
    heap: BinaryHeap<ScheduledEntry>,
    live_ids: HashSet<u64>,
}

/// Owns one scheduler thread and a min-heap of pending fires, all guarded
/// by a single mutex: the heap and the live-id set used for cancellation
/// are consulted together so a cancel racing a pop can never observe one
/// without the other.
///
/// The timer never runs user work on its own thread; due entries are
/// handed off to a small helper [`WorkerPool`] so a slow callback cannot
/// delay the next fire.
pub struct Timer {
    state: Arc<(Mutex<TimerState>, Condvar)>,
    running: Arc<AtomicBool>,
    scheduler: Mutex<Option<JoinHandle<()>>>,
    helper_pool: Arc<WorkerPool>,
    next_seq: Arc<AtomicU64>,
    repeat_ids: IdSequence,
    stack_size: usize,
}

impl Timer {
    /// Builds the helper pool and the scheduler's state; neither the
    /// helper pool's worker threads nor the scheduler thread exist yet.
    /// Call [`Timer::start`] to bring the timer up.
    #[must_use]
    pub fn new(helper_pool_size: usize, stack_size: usize) -> Self {
        let helper_pool = Arc::new(WorkerPool::new("exec-timer-helper", helper_pool_size, stack_size));
        let state = Arc::new((
            Mutex::new(TimerState {
                heap: BinaryHeap::new(),
                live_ids: HashSet::new(),
            }),
            Condvar::new(),
        ));

        Self {
            state,
            running: Arc::new(AtomicBool::new(false)),
            scheduler: Mutex::new(None),
            helper_pool,
            next_seq: Arc::new(AtomicU64::new(0)),
            repeat_ids: IdSequence::starting_at(1),
            stack_size,
        }
    }

    /// Starts the helper pool's worker threads and the scheduler thread.
    ///
    /// Idempotent: if the timer is already running, this spawns nothing
    /// and returns `Ok(false)`. Otherwise it starts the helper pool,
    /// spawns the scheduler thread, and returns `Ok(true)`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutorError::SpawnFailure`] if the OS refuses to create
    /// the helper pool's worker thread(s) or the scheduler thread itself;
    /// the timer is left not running.
    pub fn start(&self) -> Result<bool, ExecutorError> {
        if self.running.swap(true, AtomicOrdering::AcqRel) {
            return Ok(false);
        }

        if let Err(err) = self.helper_pool.start() {
            self.running.store(false, AtomicOrdering::SeqCst);
            return Err(err);
        }

        match spawn_scheduler(
            Arc::clone(&self.state),
            Arc::clone(&self.running),
            Arc::clone(&self.helper_pool),
            Arc::clone(&self.next_seq),
            self.stack_size,
        ) {
            Ok(handle) => {
                *self.scheduler.lock() = Some(handle);
                Ok(true)
            }
            Err(err) => {
                self.running.store(false, AtomicOrdering::SeqCst);
                self.helper_pool.stop();
                Err(ExecutorError::SpawnFailure(err))
            }
        }
    }

    /// Schedules `work` to run once, after `delay`.
    ///
    /// A zero or already-elapsed delay fires as soon as the scheduler
    /// thread next observes the heap.
    pub fn post_delayed(&self, work: WorkItem, delay: Duration) {
        let entry = ScheduledEntry {
            deadline: Instant::now() + delay,
            seq: self.next_seq.fetch_add(1, AtomicOrdering::Relaxed),
            repeat_id: 0,
            interval: Duration::ZERO,
            remaining: 1,
            action: Action::Once(work),
        };
        self.push(entry);
    }

    /// Schedules `work` to run every `interval`, up to `count` times, and
    /// returns the id used to cancel it early.
    ///
    /// `count == 0` allocates an id but schedules no fires.
    pub fn post_repeated<F>(&self, work: F, interval: Duration, count: u32) -> RepeatId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let repeat_id = self.repeat_ids.next_repeat_id();
        let raw_id = repeat_id.raw();
        if count == 0 {
            return repeat_id;
        }

        {
            let mut state = self.state.0.lock();
            state.live_ids.insert(raw_id);
        }

        let entry = ScheduledEntry {
            deadline: Instant::now() + interval,
            seq: self.next_seq.fetch_add(1, AtomicOrdering::Relaxed),
            repeat_id: raw_id,
            interval,
            remaining: count,
            action: Action::Repeating(Arc::new(work)),
        };
        self.push(entry);
        repeat_id
    }

    /// Removes `repeat_id` from the live-id set.
    ///
    /// Idempotent and non-blocking: cancelling an unknown or already
    /// terminal id is a silent no-op. A fire already popped off the heap
    /// and handed to the helper pool before this call still runs — only
    /// future fires are affected.
    pub fn cancel_repeated(&self, repeat_id: RepeatId) {
        self.state.0.lock().live_ids.remove(&repeat_id.raw());
    }

    fn push(&self, entry: ScheduledEntry) {
        let mut state = self.state.0.lock();
        state.heap.push(entry);
        drop(state);
        self.state.1.notify_all();
    }

    /// Stops the scheduler thread and the helper pool.
    pub fn stop(&self) {
        if !self.running.swap(false, AtomicOrdering::AcqRel) {
            return;
        }
        self.state.1.notify_all();
        if let Some(handle) = self.scheduler.lock().take() {
            let _ = handle.join();
        }
        self.helper_pool.stop();
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.running.store(false, AtomicOrdering::SeqCst);
        self.state.1.notify_all();
    }
}

fn spawn_scheduler(
    state: Arc<(Mutex<TimerState>, Condvar)>,
    running: Arc<AtomicBool>,
    helper_pool: Arc<WorkerPool>,
    next_seq: Arc<AtomicU64>,
    stack_size: usize,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("exec-timer-scheduler".into())
        .stack_size(stack_size)
        .spawn(move || {
            debug!("timer scheduler thread started");
            'scheduler: loop {
                let due = {
                    let (mutex, condvar) = &*state;
                    let mut locked = mutex.lock();
                    loop {
                        if !running.load(AtomicOrdering::Acquire) {
                            break 'scheduler;
                        }
                        let Some(top) = locked.heap.peek() else {
                            condvar.wait(&mut locked);
                            continue;
                        };
                        let now = Instant::now();
                        if top.deadline <= now {
                            break locked.heap.pop().expect("heap non-empty: just peeked");
                        }
                        let wait = top.deadline - now;
                        condvar.wait_for(&mut locked, wait);
                    }
                };

                if due.repeat_id != 0 {
                    let still_live = state.0.lock().live_ids.contains(&due.repeat_id);
                    if !still_live {
                        debug!(repeat_id = due.repeat_id, "dropping cancelled repeat entry");
                        continue;
                    }
                }

                let remaining = due.remaining;
                let interval = due.interval;
                let repeat_id = due.repeat_id;

                match due.action {
                    Action::Once(work) => {
                        if let Err(err) = helper_pool.submit(work) {
                            warn!(error = %err, "timer failed to hand off one-shot fire");
                        }
                    }
                    Action::Repeating(callback) => {
                        let fire = Arc::clone(&callback);
                        if let Err(err) = helper_pool.submit(Box::new(move || fire())) {
                            warn!(error = %err, repeat_id, "timer failed to hand off repeated fire");
                        }
                        if remaining > 1 {
                            let next = ScheduledEntry {
                                deadline: Instant::now() + interval,
                                seq: next_seq.fetch_add(1, AtomicOrdering::Relaxed),
                                repeat_id,
                                interval,
                                remaining: remaining - 1,
                                action: Action::Repeating(callback),
                            };
                            state.0.lock().heap.push(next);
                        } else {
                            state.0.lock().live_ids.remove(&repeat_id);
                        }
                    }
                }
            }
            debug!("timer scheduler thread exiting");
        })
}
