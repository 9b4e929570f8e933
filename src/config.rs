//! Configuration for the process-wide [`crate::Context`] and the pools it
//! builds on demand.
//!
//! Mirrors the shape of the scheduler configuration this crate grew out
//! of: a plain `serde`-derived struct with a `validate` step and a
//! `from_json_str` convenience constructor, rather than a builder.

use serde::{Deserialize, Serialize};

/// Tunables for the executor that [`crate::Context`] constructs on first
/// access.
///
/// `Default` gives every field a sensible value so `Context::instance()`
/// works with no configuration at all; call
/// [`Context::configure`](crate::Context::configure) before the first
/// access to override it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct ExecutorConfig {
    /// Worker thread count for a runner pool created with no explicit size.
    pub default_pool_size: usize,
    /// Worker thread count for the timer's own helper pool, which executes
    /// fired deadlines off the scheduler thread.
    pub timer_helper_pool_size: usize,
    /// Stack size, in bytes, given to every worker thread this crate spawns.
    pub worker_stack_size: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            default_pool_size: num_cpus::get().max(1),
            timer_helper_pool_size: 2,
            worker_stack_size: 2 * 1024 * 1024,
        }
    }
}

impl ExecutorConfig {
    /// Checks that every field is usable; zero-sized pools and zero-byte
    /// stacks are rejected rather than silently clamped.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field found.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_pool_size == 0 {
            return Err("default_pool_size must be greater than 0".into());
        }
        if self.timer_helper_pool_size == 0 {
            return Err("timer_helper_pool_size must be greater than 0".into());
        }
        if self.worker_stack_size < 16 * 1024 {
            return Err("worker_stack_size must be at least 16KiB".into());
        }
        Ok(())
    }

    /// Parses configuration from a JSON string and validates it.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON for this shape, or
    /// if [`validate`](Self::validate) rejects the parsed values.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        ExecutorConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_pool_size_rejected() {
        let cfg = ExecutorConfig {
            default_pool_size: 0,
            ..ExecutorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tiny_stack_rejected() {
        let cfg = ExecutorConfig {
            worker_stack_size: 1024,
            ..ExecutorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn from_json_str_round_trips() {
        let json = r#"{
            "default_pool_size": 4,
            "timer_helper_pool_size": 2,
            "worker_stack_size": 1048576
        }"#;
        let cfg = ExecutorConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.default_pool_size, 4);
        assert_eq!(cfg.timer_helper_pool_size, 2);
        assert_eq!(cfg.worker_stack_size, 1024 * 1024);
    }

    #[test]
    fn from_json_str_rejects_invalid_values() {
        let json = r#"{
            "default_pool_size": 0,
            "timer_helper_pool_size": 1,
            "worker_stack_size": 1048576
        }"#;
        assert!(ExecutorConfig::from_json_str(json).is_err());
    }
}
