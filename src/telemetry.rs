//! Structured logging bootstrap.
//!
//! Every worker thread, the timer scheduler thread, and the registry log
//! through `tracing` rather than `eprintln!`; this is the one place that
//! decides what happens if nobody else installed a subscriber first.

/// Installs a default env-filtered `tracing` subscriber if the process has
/// not already set one.
///
/// Safe to call more than once, and safe to call from a binary that already
/// installed its own subscriber before touching this crate: the check is a
/// no-op in that case.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
