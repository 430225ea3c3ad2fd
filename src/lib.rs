// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod supervisor;
pub mod web;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use crate::config::{LaunchConfig, RunMode};
use crate::supervisor::{
    GRACE_PERIOD, SharedStatus, ShutdownSignal, Supervisor, SupervisorEvent, child,
    spawn_grace_timer,
};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - the subprocess spawn (per-mode stdio wiring)
/// - the supervisor event channel, grace timer and exit watcher
/// - termination-signal listeners
/// - (web mode) the HTTP listener, closed gracefully before exit
///
/// Returns the exit code the process should terminate with: the child's own
/// code, 1 if the child exited without one, 0 on signal-initiated shutdown.
pub async fn run(config: LaunchConfig) -> Result<i32> {
    info!(mode = %config.mode, version = %config.mcp_version, "launching mcp subprocess");

    let mut child = child::spawn_mcp(&config)?;
    let pid = child.id().context("spawned mcp process has no pid")?;
    let status = SharedStatus::new(pid);
    info!(pid, "mcp subprocess started");

    let (events_tx, events_rx) = mpsc::channel::<SupervisorEvent>(16);

    let forwarders = match config.mode {
        RunMode::Stdio => Vec::new(),
        RunMode::Web => child::spawn_output_forwarders(&mut child),
    };
    child::spawn_exit_watcher(child, forwarders, events_tx.clone());
    spawn_grace_timer(GRACE_PERIOD, events_tx.clone());
    spawn_signal_listeners(events_tx);

    // Bind before entering the loop so /health answers during the grace
    // period.
    let server = match config.mode {
        RunMode::Web => {
            let listener = TcpListener::bind(("0.0.0.0", config.port))
                .await
                .with_context(|| format!("binding http listener on port {}", config.port))?;
            info!(port = config.port, "web mode listening");

            let app = web::router(web::AppState::new(status.clone(), &config));
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            let handle = tokio::spawn(web::serve(listener, app, shutdown_rx));
            Some((shutdown_tx, handle))
        }
        RunMode::Stdio => None,
    };

    let code = Supervisor::new(status, events_rx).run().await;

    // Close the listener before the process exits.
    if let Some((shutdown_tx, handle)) = server {
        let _ = shutdown_tx.send(true);
        let _ = handle.await;
    }

    Ok(code)
}

/// Listen for termination signals and turn them into supervisor events.
#[cfg(unix)]
fn spawn_signal_listeners(events_tx: mpsc::Sender<SupervisorEvent>) {
    use tokio::signal::unix::{SignalKind, signal};

    let tx = events_tx.clone();
    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(err) => {
                error!(error = %err, "failed to install SIGTERM handler");
                return;
            }
        };
        if sigterm.recv().await.is_some() {
            let _ = tx
                .send(SupervisorEvent::ShutdownRequested {
                    signal: ShutdownSignal::Terminate,
                })
                .await;
        }
    });

    tokio::spawn(async move {
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(err) => {
                error!(error = %err, "failed to install SIGINT handler");
                return;
            }
        };
        if sigint.recv().await.is_some() {
            let _ = events_tx
                .send(SupervisorEvent::ShutdownRequested {
                    signal: ShutdownSignal::Interrupt,
                })
                .await;
        }
    });
}

#[cfg(not(unix))]
fn spawn_signal_listeners(events_tx: mpsc::Sender<SupervisorEvent>) {
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            return;
        }
        let _ = events_tx
            .send(SupervisorEvent::ShutdownRequested {
                signal: ShutdownSignal::Interrupt,
            })
            .await;
    });
}
