// src/supervisor/child.rs

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{LaunchConfig, RunMode};
use crate::supervisor::events::{ShutdownSignal, SupervisorEvent};

/// npm package providing the wrapped MCP server.
pub const MCP_PACKAGE: &str = "@shopify/dev-mcp";

/// Build the version-qualified `npx` invocation for the wrapped server.
pub fn mcp_command(version: &str) -> Command {
    let mut cmd = Command::new("npx");
    cmd.arg("-y").arg(format!("{MCP_PACKAGE}@{version}"));
    cmd
}

/// Spawn the MCP server subprocess with per-mode stdio wiring.
///
/// - stdio mode: the child shares the parent's stdin/stdout/stderr, so the
///   protocol stream passes straight through.
/// - web mode: stdin is closed, stdout/stderr come back piped for forwarding.
///
/// The parent's environment is inherited in both modes.
pub fn spawn_mcp(config: &LaunchConfig) -> Result<Child> {
    let mut cmd = mcp_command(&config.mcp_version);

    match config.mode {
        RunMode::Stdio => {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
        RunMode::Web => {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }
    }

    cmd.kill_on_drop(true);

    cmd.spawn()
        .with_context(|| format!("spawning {MCP_PACKAGE}@{}", config.mcp_version))
}

/// Attach line-by-line forwarders to the child's piped output, tagging each
/// line with its source stream.
///
/// These are fire-and-forget Tokio tasks; the returned handles let the exit
/// watcher wait for EOF so the exit event is ordered after every data line.
/// Draining also keeps the OS pipe buffers from filling.
pub fn spawn_output_forwarders(child: &mut Child) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::new();

    if let Some(stdout) = child.stdout.take() {
        handles.push(tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(stream = "mcp-out", "{}", line);
            }
        }));
    } else {
        warn!("child stdout not piped; nothing to forward");
    }

    if let Some(stderr) = child.stderr.take() {
        handles.push(tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(stream = "mcp-err", "{}", line);
            }
        }));
    } else {
        warn!("child stderr not piped; nothing to forward");
    }

    handles
}

/// Wait for the child to exit and emit exactly one `ChildExited` event.
///
/// Forwarder tasks are awaited first, so by the time the event reaches the
/// supervisor every line the child produced has been forwarded.
pub fn spawn_exit_watcher(
    mut child: Child,
    forwarders: Vec<JoinHandle<()>>,
    events_tx: mpsc::Sender<SupervisorEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let status = child.wait().await;

        for handle in forwarders {
            if let Err(err) = handle.await {
                debug!(error = %err, "output forwarder ended abnormally");
            }
        }

        let event = match status {
            Ok(status) => SupervisorEvent::ChildExited {
                code: status.code(),
                signal: exit_signal(&status),
            },
            Err(err) => {
                warn!(error = %err, "waiting for mcp process failed");
                SupervisorEvent::ChildExited {
                    code: None,
                    signal: None,
                }
            }
        };

        let _ = events_tx.send(event).await;
    })
}

#[cfg(unix)]
fn exit_signal(status: &std::process::ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &std::process::ExitStatus) -> Option<i32> {
    None
}

/// Forward a termination signal to the child process.
#[cfg(unix)]
pub fn forward_signal(pid: u32, signal: ShutdownSignal) {
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    let sig = match signal {
        ShutdownSignal::Terminate => Signal::SIGTERM,
        ShutdownSignal::Interrupt => Signal::SIGINT,
    };

    if let Err(err) = kill(Pid::from_raw(pid as i32), sig) {
        warn!(pid, signal = %signal, error = %err, "failed to forward signal to mcp process");
    }
}

#[cfg(not(unix))]
pub fn forward_signal(pid: u32, signal: ShutdownSignal) {
    warn!(pid, signal = %signal, "signal forwarding is not supported on this platform");
}
