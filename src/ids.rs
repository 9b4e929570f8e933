//! Opaque identifiers handed back to callers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies a named runner (one [`crate::WorkerPool`]) inside a
/// [`crate::RunnerRegistry`].
///
/// Returned by [`Executor::add_runner`](crate::Executor::add_runner);
/// opaque by design, so callers cannot construct one out of thin air and
/// must always go through the registry. Carries no ordering guarantee
/// beyond "issued before or after another tag".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunnerTag(u64);

impl RunnerTag {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(self) -> u64 {
        self.0
    }
}

/// Identifies one outstanding repeated schedule inside a [`crate::Timer`],
/// returned by
/// [`Executor::post_repeated`](crate::Executor::post_repeated) and consumed
/// by [`Executor::cancel_repeated`](crate::Executor::cancel_repeated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepeatId(u64);

impl RepeatId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub(crate) const fn raw(self) -> u64 {
        self.0
    }
}

/// Monotonic issuer shared by [`RunnerTag`] and [`RepeatId`] allocation
/// sites; each call site owns its own counter instance.
#[derive(Debug, Default)]
pub(crate) struct IdSequence {
    next: AtomicU64,
}

impl IdSequence {
    pub(crate) const fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    /// Like [`new`](Self::new), but the first id issued is `start` rather
    /// than `0`. The timer's repeat-id sequence uses this to reserve `0`
    /// as the "this is a one-shot entry" sentinel.
    pub(crate) const fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    pub(crate) fn next_runner_tag(&self) -> RunnerTag {
        RunnerTag::from_raw(self.next.fetch_add(1, Ordering::Relaxed))
    }

    pub(crate) fn next_repeat_id(&self) -> RepeatId {
        RepeatId::from_raw(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
