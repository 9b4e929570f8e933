//! Mutual exclusion primitive.
//!
//! Every lock in this crate — a `WorkerPool`'s FIFO, a `Timer`'s heap, the
//! `RunnerRegistry`'s map — goes through this thin wrapper rather than
//! `std::sync::Mutex` directly, so the backing implementation can change
//! without touching call sites. It is built on `parking_lot`: no
//! poisoning (a panicking worker must not wedge the pool it belongs to),
//! fair acquisition, and a footprint of a single word.
//!
//! # Examples
//!
//! ```
//! use executor_core::Mutex;
//!
//! let queue_depth = Mutex::new(0usize);
//! *queue_depth.lock() += 1;
//! assert_eq!(*queue_depth.lock(), 1);
//! ```
//!
//! Shared across worker threads:
//!
//! ```
//! use executor_core::Mutex;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let completed = Arc::new(Mutex::new(0u64));
//! let mut handles = vec![];
//!
//! for _ in 0..10 {
//!     let completed = Arc::clone(&completed);
//!     handles.push(thread::spawn(move || {
//!         *completed.lock() += 1;
//!     }));
//! }
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(*completed.lock(), 10);
//! ```

// Re-export parking_lot's Mutex types; this crate never uses std::sync::Mutex directly.
pub use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
