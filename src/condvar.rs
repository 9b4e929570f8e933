//! Condition variable used by both the worker pool and the timer to block
//! without polling.
//!
//! A `WorkerPool` worker blocks on one of these until the FIFO is
//! non-empty or the pool is stopped; the `Timer` scheduler thread blocks
//! on one until the heap is non-empty, then performs a bounded
//! [`wait_for`](Condvar::wait_for) until the next deadline or a new
//! insertion.

use crate::MutexGuard;
use parking_lot;
use std::time::Duration;

pub use parking_lot::WaitTimeoutResult;

/// A condition variable.
///
/// Unlike `std::sync::Condvar`, this type does not implement poisoning:
/// a worker thread that panics while holding the guard does not wedge
/// every other waiter on the same pool.
///
/// # Examples
///
/// ```
/// use executor_core::{Mutex, Condvar};
/// use std::sync::Arc;
/// use std::thread;
///
/// // A minimal stand-in for a worker pool's running flag + FIFO depth.
/// let pair = Arc::new((Mutex::new(false), Condvar::new()));
/// let pair2 = Arc::clone(&pair);
///
/// thread::spawn(move || {
///     let (lock, cvar) = &*pair2;
///     let mut running = lock.lock();
///     *running = true;
///     cvar.notify_one();
/// });
///
/// let (lock, cvar) = &*pair;
/// let mut running = lock.lock();
/// while !*running {
///     cvar.wait(&mut running);
/// }
/// ```
#[derive(Debug, Default)]
pub struct Condvar {
    inner: parking_lot::Condvar,
}

impl Condvar {
    /// Creates a new condition variable.
    #[inline]
    pub const fn new() -> Self {
        Self {
            inner: parking_lot::Condvar::new(),
        }
    }

    /// Blocks the current thread until notified.
    ///
    /// Atomically unlocks `guard` and blocks; re-acquires the lock before
    /// returning. Always called in a loop re-checking the predicate — a
    /// single wake can be spurious or can race a second waiter.
    #[inline]
    pub fn wait<T>(&self, guard: &mut MutexGuard<'_, T>) {
        self.inner.wait(guard);
    }

    /// Blocks until `condition` returns `false`, re-checking after every
    /// wake. This is what a worker pool's main loop reduces to: wait
    /// while `!running && queue.is_empty()`.
    #[inline]
    pub fn wait_while<T, F>(&self, guard: &mut MutexGuard<'_, T>, condition: F)
    where
        F: FnMut(&mut T) -> bool,
    {
        self.inner.wait_while(guard, condition);
    }

    /// Blocks until notified or `timeout` elapses, whichever comes first.
    ///
    /// The timer's scheduler thread uses this to sleep until the next
    /// deadline while still waking immediately on a new, earlier
    /// insertion or on shutdown.
    #[inline]
    pub fn wait_for<T>(
        &self,
        guard: &mut MutexGuard<'_, T>,
        timeout: Duration,
    ) -> WaitTimeoutResult {
        self.inner.wait_for(guard, timeout)
    }

    /// Wakes one blocked thread, if any. Not buffered: a `notify_one`
    /// with no current waiter is simply lost, which is why every waiter
    /// re-checks its predicate under the lock rather than counting on
    /// catching every signal.
    #[inline]
    pub fn notify_one(&self) {
        self.inner.notify_one();
    }

    /// Wakes every blocked thread. Used for pool shutdown (wake all
    /// workers so they can observe the cleared running flag) and timer
    /// shutdown.
    #[inline]
    pub fn notify_all(&self) {
        self.inner.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mutex;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_basic_wait_notify() {
        let pair = Arc::new((Mutex::new(false), Condvar::new()));
        let pair2 = Arc::clone(&pair);

        thread::spawn(move || {
            let (lock, cvar) = &*pair2;
            thread::sleep(Duration::from_millis(10));
            let mut started = lock.lock();
            *started = true;
            cvar.notify_one();
        });

        let (lock, cvar) = &*pair;
        let mut started = lock.lock();
        while !*started {
            cvar.wait(&mut started);
        }
        assert!(*started);
    }

    #[test]
    fn test_wait_while() {
        let pair = Arc::new((Mutex::new(0), Condvar::new()));
        let pair2 = Arc::clone(&pair);

        thread::spawn(move || {
            let (lock, cvar) = &*pair2;
            for i in 1..=10 {
                thread::sleep(Duration::from_millis(2));
                let mut count = lock.lock();
                *count = i;
                cvar.notify_one();
            }
        });

        let (lock, cvar) = &*pair;
        let mut count = lock.lock();
        cvar.wait_while(&mut count, |c| *c < 10);
        assert_eq!(*count, 10);
    }

    #[test]
    fn test_wait_for_times_out_when_nobody_notifies() {
        let lock = Mutex::new(());
        let cvar = Condvar::new();

        let mut guard = lock.lock();
        let result = cvar.wait_for(&mut guard, Duration::from_millis(20));
        assert!(result.timed_out());
    }

    #[test]
    fn test_wait_for_wakes_on_notify_before_timeout() {
        let pair = Arc::new((Mutex::new(false), Condvar::new()));
        let pair2 = Arc::clone(&pair);

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(5));
            let (lock, cvar) = &*pair2;
            *lock.lock() = true;
            cvar.notify_one();
        });

        let (lock, cvar) = &*pair;
        let mut ready = lock.lock();
        while !*ready {
            let result = cvar.wait_for(&mut ready, Duration::from_secs(5));
            if result.timed_out() {
                panic!("should have been notified long before the 5s timeout");
            }
        }
    }

    #[test]
    fn test_notify_all_wakes_every_waiter() {
        let pair = Arc::new((Mutex::new(false), Condvar::new()));
        let mut handles = vec![];

        for _ in 0..5 {
            let pair = Arc::clone(&pair);
            handles.push(thread::spawn(move || {
                let (lock, cvar) = &*pair;
                let mut started = lock.lock();
                while !*started {
                    cvar.wait(&mut started);
                }
            }));
        }

        thread::sleep(Duration::from_millis(10));

        {
            let (lock, cvar) = &*pair;
            *lock.lock() = true;
            cvar.notify_all();
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_producer_consumer_fifo() {
        let pair = Arc::new((Mutex::new(Vec::new()), Condvar::new()));
        let pair2 = Arc::clone(&pair);

        let producer = thread::spawn(move || {
            let (lock, cvar) = &*pair2;
            for i in 0..5 {
                thread::sleep(Duration::from_millis(2));
                lock.lock().push(i);
                cvar.notify_one();
            }
        });

        let (lock, cvar) = &*pair;
        let mut consumed = Vec::new();
        while consumed.len() < 5 {
            let mut queue = lock.lock();
            while queue.is_empty() {
                cvar.wait(&mut queue);
            }
            consumed.push(queue.remove(0));
        }

        producer.join().unwrap();
        assert_eq!(consumed, vec![0, 1, 2, 3, 4]);
    }
}
