//! Worker configuration.

use std::time::Duration;

/// How the executor behaves when the queue reports empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Stop once the queue drains (batch semantics)
    Drain,
    /// Idle for the poll interval and retry (long-running service)
    #[default]
    Standing,
}

/// Worker pool configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Number of worker loops in the pool
    pub worker_count: usize,
    /// How long a standing worker idles when the queue is empty
    pub poll_interval: Duration,
    /// Behavior on an empty queue
    pub run_mode: RunMode,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            worker_count: 2,
            poll_interval: Duration::from_millis(1000),
            run_mode: RunMode::Standing,
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            worker_count: std::env::var("WORKER_COUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&n: &usize| n > 0)
                .unwrap_or(2),
            poll_interval: Duration::from_millis(
                std::env::var("WORKER_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            ),
            run_mode: match std::env::var("WORKER_RUN_MODE").as_deref() {
                Ok("drain") => RunMode::Drain,
                _ => RunMode::Standing,
            },
        }
    }
}
