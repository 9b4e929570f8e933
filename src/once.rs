//! One-time initialization primitives.
//!
//! This module provides synchronization primitives for one-time initialization:
//!
//! - [`Once`] - Ensures a piece of code is executed exactly once (from `parking_lot`)
//! - [`OnceCell`] - A cell that can be written to only once (from `std::sync::OnceLock`)
//!
//! **Note:** `Once` is re-exported from the `parking_lot` crate for high performance.
//! `OnceCell` is re-exported from `std::sync::OnceLock` since `parking_lot` does not
//! provide a `OnceCell` type. Both provide thread-safe one-time initialization.
//!
//! [`crate::Context`] is the reason this module exists: a process needs
//! exactly one [`crate::Executor`], constructed on first access from
//! whichever thread gets there first, and never re-initialized.
//!
//! # Examples
//!
//! ## Using `Once` for one-time initialization
//!
//! ```
//! use executor_core::Once;
//!
//! static INIT: Once = Once::new();
//!
//! INIT.call_once(|| {
//!     // runs only once, even if reached from multiple threads
//! });
//! ```
//!
//! ## Using `OnceCell` for the singleton pattern
//!
//! ```
//! use executor_core::OnceCell;
//!
//! struct Widget(u32);
//!
//! static WIDGET: OnceCell<Widget> = OnceCell::new();
//!
//! let first = WIDGET.get_or_init(|| Widget(42));
//! let second = WIDGET.get().unwrap();
//! assert_eq!(first.0, second.0);
//! ```

// Re-export Once from parking_lot
pub use parking_lot::Once;

// Re-export std::sync::OnceLock as OnceCell
// Note: parking_lot does not provide OnceCell, so we use std::sync::OnceLock (Rust 1.70+)
// which provides equivalent thread-safe lazy initialization functionality.
pub use std::sync::OnceLock as OnceCell;
