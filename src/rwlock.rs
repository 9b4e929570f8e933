//! Reader-writer lock.
//!
//! The `RunnerRegistry` uses this for its tag -> pool map: `get_runner`
//! (a read) is on the hot path of every `post`/`post_with_result` call
//! and must not contend with itself, while `add_runner` (a write) is rare
//! by comparison. Built on `parking_lot` for the same reasons as
//! [`crate::Mutex`]: no poisoning, fair acquisition.
//!
//! # Examples
//!
//! ```
//! use executor_core::RwLock;
//!
//! let registered = RwLock::new(0usize);
//!
//! {
//!     let r1 = registered.read();
//!     let r2 = registered.read();
//!     assert_eq!(*r1, 0);
//!     assert_eq!(*r2, 0);
//! }
//!
//! {
//!     let mut w = registered.write();
//!     *w += 1;
//! }
//!
//! assert_eq!(*registered.read(), 1);
//! ```

// Re-export parking_lot's RwLock types; this crate never uses std::sync::RwLock directly.
pub use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard,
    RwLockUpgradableReadGuard, RwLockWriteGuard,
};
