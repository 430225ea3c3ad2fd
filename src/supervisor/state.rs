// src/supervisor/state.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Shared snapshot of the supervised child, read by the HTTP handlers.
///
/// Single-writer discipline: `healthy` is written only by the grace-period
/// timer, the exit record only by the exit watcher. Each field is written at
/// most once and readers never block.
#[derive(Debug, Clone)]
pub struct SharedStatus {
    inner: Arc<StatusInner>,
}

#[derive(Debug)]
struct StatusInner {
    pid: u32,
    started: Instant,
    started_at_ms: u64,
    healthy: AtomicBool,
    exit: OnceLock<Option<i32>>,
}

impl SharedStatus {
    pub fn new(pid: u32) -> Self {
        let started_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            inner: Arc::new(StatusInner {
                pid,
                started: Instant::now(),
                started_at_ms,
                healthy: AtomicBool::new(false),
                exit: OnceLock::new(),
            }),
        }
    }

    pub fn pid(&self) -> u32 {
        self.inner.pid
    }

    /// Spawn time as milliseconds since the Unix epoch.
    pub fn started_at_ms(&self) -> u64 {
        self.inner.started_at_ms
    }

    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }

    /// Flip readiness to true. Never reverts while the process lives.
    pub fn mark_healthy(&self) {
        self.inner.healthy.store(true, Ordering::Release);
    }

    /// Whether the grace period has elapsed. Says nothing about liveness;
    /// callers re-check the exit record separately.
    pub fn is_healthy(&self) -> bool {
        self.inner.healthy.load(Ordering::Acquire)
    }

    /// Record the child's exit. Only the exit watcher calls this.
    pub fn record_exit(&self, code: Option<i32>) {
        let _ = self.inner.exit.set(code);
    }

    pub fn has_exited(&self) -> bool {
        self.inner.exit.get().is_some()
    }

    /// Exit code if the child exited with one; `None` while it is running or
    /// when it was killed by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.inner.exit.get().copied().flatten()
    }
}
