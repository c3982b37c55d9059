//! Health Check API Tests

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_json, body_text, TestApp};

#[tokio::test]
async fn health_check_returns_ok() {
    let app = TestApp::new(Duration::from_millis(100));

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn liveness_probe_returns_ok() {
    let app = TestApp::new(Duration::from_millis(100));

    let response = app.get("/health/live").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_reports_relay_occupancy() {
    let app = TestApp::new(Duration::from_millis(100));
    app.post_json("/api/v1/chat/join", r#"{"room_id":"lobby"}"#)
        .await;

    let response = app.get("/health/ready").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["relay"]["rooms"], 1);
    assert_eq!(body["relay"]["clients"], 1);
}

#[tokio::test]
async fn metrics_endpoint_exposes_relay_metrics() {
    let app = TestApp::new(Duration::from_millis(100));
    app.post_json("/api/v1/chat/join", r#"{"room_id":"lobby"}"#)
        .await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("chat_relay_room_joins_total"));
}
