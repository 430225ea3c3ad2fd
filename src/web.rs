// src/web.rs

//! Minimal HTTP health/status surface for web mode.
//!
//! This does not proxy the wrapped protocol: the MCP server speaks stdio,
//! and the only thing exposed over HTTP is lifecycle information for
//! platforms that require a listening port.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::error;

use crate::config::{LaunchConfig, RunMode};
use crate::supervisor::SharedStatus;

/// State shared with the request handlers.
#[derive(Debug)]
pub struct AppState {
    status: SharedStatus,
    mode: RunMode,
    mcp_version: String,
}

impl AppState {
    pub fn new(status: SharedStatus, config: &LaunchConfig) -> Arc<Self> {
        Arc::new(Self {
            status,
            mode: config.mode,
            mcp_version: config.mcp_version.clone(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_seconds: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub mode: String,
    pub mcp_version: String,
    pub pid: u32,
    pub exit_code: Option<i32>,
    pub started_at: u64,
}

/// Build the two-route router with a 404 fallback.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
        .fallback(not_found)
        .with_state(state)
}

/// Liveness/readiness probe.
///
/// `ok` requires both that the grace period elapsed and that the child has
/// not exited; the two signals are independent, so a dead child reports
/// `starting` even long after the timer fired.
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let ok = state.status.is_healthy() && !state.status.has_exited();

    let body = HealthResponse {
        status: if ok { "ok" } else { "starting" },
        uptime_seconds: state.status.uptime().as_secs_f64(),
    };

    let code = if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(body))
}

/// Pure snapshot of the supervised process; always 200.
async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        mode: state.mode.to_string(),
        mcp_version: state.mcp_version.clone(),
        pid: state.status.pid(),
        exit_code: state.status.exit_code(),
        started_at: state.status.started_at_ms(),
    })
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Serve until the shutdown channel fires, so the listener is closed before
/// the supervisor process exits.
pub async fn serve(listener: TcpListener, app: Router, mut shutdown_rx: watch::Receiver<bool>) {
    let shutdown = async move {
        let _ = shutdown_rx.wait_for(|stop| *stop).await;
    };

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!(error = %err, "http server error");
    }
}
