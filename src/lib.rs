//! # executor_core
//!
//! The concurrent task-execution core of a logging/runtime support library:
//! named worker pools draining a shared FIFO of work, a single deadline
//! timer that hands due work off to those pools, a registry tying pool
//! identity (`RunnerTag`) to pool instance, and a process-wide [`Context`]
//! that owns one [`Executor`] for the lifetime of the program.
//!
//! ## Design
//!
//! Three primitives, composed so that *timing* and *execution* never share
//! a thread:
//!
//! - [`WorkerPool`] owns `N` OS worker threads draining one FIFO.
//! - [`Timer`] owns one scheduling thread ordering pending fires by
//!   monotonic deadline; it only ever hands work *off* to a pool, never
//!   runs it inline.
//! - [`RunnerRegistry`] maps an opaque [`RunnerTag`] to an owned
//!   [`WorkerPool`], so logically distinct streams of work never interfere.
//!
//! [`Executor`] composes the registry and the timer behind the public
//! surface; [`Context`] lazily constructs and owns the one [`Executor`]
//! a process needs.
//!
//! ## Quick example
//!
//! ```
//! use executor_core::Context;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let counter = Arc::new(AtomicU64::new(0));
//! let executor = Context::instance().executor();
//! let tag = executor.add_runner().unwrap();
//!
//! let c = Arc::clone(&counter);
//! executor.post(tag, Box::new(move || {
//!     c.fetch_add(1, Ordering::SeqCst);
//! })).unwrap();
//!
//! std::thread::sleep(Duration::from_millis(50));
//! assert_eq!(counter.load(Ordering::SeqCst), 1);
//! ```

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod condvar;
/// Configuration for default pool sizes and thread stack sizes.
pub mod config;
/// Process-wide [`Context`] singleton owning one [`Executor`].
pub mod context;
/// Synchronous error kinds surfaced at call time (see spec §7).
pub mod error;
/// The composing public surface: runner creation, post, delayed/repeated scheduling.
pub mod executor;
/// `RunnerTag` / `RepeatId` identifier newtypes.
pub mod ids;
mod mutex;
mod once;
/// The runner registry: tag -> owned `WorkerPool`.
pub mod registry;
/// Single-assignment async result handle returned by `post_with_result`.
pub mod result_handle;
mod rwlock;
/// Structured logging bootstrap.
pub mod telemetry;
/// The deadline timer: one scheduler thread, a min-heap, tombstone cancellation.
pub mod timer;
/// Type-erased nullary work items.
pub mod work_item;
/// The fixed-size worker pool: FIFO + N worker threads.
pub mod worker_pool;

pub use condvar::Condvar;
pub use context::Context;
pub use error::{ExecutorError, WorkFault};
pub use executor::Executor;
pub use ids::{RepeatId, RunnerTag};
pub use mutex::{MappedMutexGuard, Mutex, MutexGuard};
pub use once::{Once, OnceCell};
pub use registry::RunnerRegistry;
pub use result_handle::ResultHandle;
pub use rwlock::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard,
    RwLockUpgradableReadGuard, RwLockWriteGuard,
};
pub use timer::Timer;
pub use work_item::WorkItem;
pub use worker_pool::{PoolStats, WorkerPool};
