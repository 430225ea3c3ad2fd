use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mcpshim::config::{LaunchConfig, RunMode};
use mcpshim::supervisor::SharedStatus;
use mcpshim::web::{self, AppState};

fn web_config() -> LaunchConfig {
    LaunchConfig {
        mode: RunMode::Web,
        port: 8080,
        mcp_version: "latest".to_string(),
    }
}

fn app(status: &SharedStatus) -> Router {
    web::router(AppState::new(status.clone(), &web_config()))
}

async fn get_json(router: Router, path: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let code = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();

    (code, value)
}

#[tokio::test]
async fn health_reports_starting_before_the_grace_period() {
    let status = SharedStatus::new(100);

    let (code, body) = get_json(app(&status), "/health").await;

    assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "starting");
    assert!(body["uptimeSeconds"].is_number());
}

#[tokio::test]
async fn health_reports_ok_after_the_grace_period() {
    let status = SharedStatus::new(100);
    status.mark_healthy();

    let (code, body) = get_json(app(&status), "/health").await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn health_reports_starting_after_the_child_exited() {
    let status = SharedStatus::new(100);
    status.mark_healthy();
    status.record_exit(Some(0));

    let (code, body) = get_json(app(&status), "/health").await;

    assert_eq!(code, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "starting");
}

#[tokio::test]
async fn status_snapshots_the_running_child() {
    let status = SharedStatus::new(4321);

    let (code, body) = get_json(app(&status), "/status").await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["mode"], "web");
    assert_eq!(body["mcpVersion"], "latest");
    assert_eq!(body["pid"], 4321);
    assert_eq!(body["exitCode"], Value::Null);
    assert!(body["startedAt"].is_number());
}

#[tokio::test]
async fn status_reflects_the_exit_code_after_exit() {
    let status = SharedStatus::new(4321);
    status.record_exit(Some(7));

    let (code, body) = get_json(app(&status), "/status").await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["exitCode"], 7);
}

#[tokio::test]
async fn status_keeps_exit_code_null_for_signal_kills() {
    let status = SharedStatus::new(4321);
    status.record_exit(None);

    let (code, body) = get_json(app(&status), "/status").await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["exitCode"], Value::Null);
}

#[tokio::test]
async fn unknown_paths_return_not_found() {
    let status = SharedStatus::new(100);

    let response = app(&status)
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"Not Found");
}
