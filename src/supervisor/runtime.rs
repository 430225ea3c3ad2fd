// src/supervisor/runtime.rs

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::supervisor::child;
use crate::supervisor::events::SupervisorEvent;
use crate::supervisor::state::SharedStatus;

/// Fixed delay after spawn before readiness is considered established,
/// covering the wrapped server's typical startup latency.
pub const GRACE_PERIOD: Duration = Duration::from_millis(1500);

/// Spawn the one-shot grace-period timer.
pub fn spawn_grace_timer(grace: Duration, events_tx: mpsc::Sender<SupervisorEvent>) {
    tokio::spawn(async move {
        sleep(grace).await;
        let _ = events_tx.send(SupervisorEvent::GraceElapsed).await;
    });
}

/// The supervisor loop.
///
/// Responsibilities:
/// - flip the readiness flag when the grace period elapses
/// - record the child's exit and propagate its code (terminal in both modes;
///   there is no respawn policy)
/// - forward termination signals to the child and exit cleanly
///
/// All producers funnel into one `mpsc` channel, so every lifecycle decision
/// is serialized here.
pub struct Supervisor {
    status: SharedStatus,
    events_rx: mpsc::Receiver<SupervisorEvent>,
}

impl Supervisor {
    pub fn new(status: SharedStatus, events_rx: mpsc::Receiver<SupervisorEvent>) -> Self {
        Self { status, events_rx }
    }

    /// Run until the child exits or a termination signal arrives, returning
    /// the exit code the supervisor process should terminate with.
    pub async fn run(mut self) -> i32 {
        while let Some(event) = self.events_rx.recv().await {
            debug!(?event, "supervisor received event");

            match event {
                SupervisorEvent::GraceElapsed => {
                    self.status.mark_healthy();
                    debug!("grace period elapsed; readiness established");
                }
                SupervisorEvent::ChildExited { code, signal } => {
                    self.status.record_exit(code);
                    error!(code = ?code, signal = ?signal, "mcp process exited");
                    return code.unwrap_or(1);
                }
                SupervisorEvent::ShutdownRequested { signal } => {
                    info!(signal = %signal, "termination signal received, shutting down");
                    child::forward_signal(self.status.pid(), signal);
                    return 0;
                }
            }
        }

        warn!("event channel closed without a child exit");
        1
    }
}
