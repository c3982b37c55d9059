//! Chat API Tests
//!
//! End-to-end tests of the long-polling chat surface: join, fan-out,
//! long-poll receive, and leave, all through the real router.

use std::time::Duration;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{body_json, TestApp};

const POLL_TIMEOUT: Duration = Duration::from_millis(200);

#[tokio::test]
async fn join_returns_a_client_id() {
    let app = TestApp::new(POLL_TIMEOUT);

    let response = app
        .post_json("/api/v1/chat/join", r#"{"room_id":"lobby"}"#)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let client_id = body["client_id"].as_str().unwrap();
    assert!(client_id.parse::<uuid::Uuid>().is_ok());
    assert_eq!(app.registry.room_count(), 1);
}

#[tokio::test]
async fn join_rejects_empty_room_id() {
    let app = TestApp::new(POLL_TIMEOUT);

    let response = app.post_json("/api/v1/chat/join", r#"{"room_id":""}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_client_is_not_found() {
    let app = TestApp::new(POLL_TIMEOUT);
    let ghost = uuid::Uuid::new_v4();

    let response = app
        .post_json(
            &format!("/api/v1/chat/message?client_id={ghost}"),
            r#"{"message":"boo"}"#,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .get(&format!("/api/v1/chat/message?client_id={ghost}"))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_client_id_is_bad_request() {
    let app = TestApp::new(POLL_TIMEOUT);

    let response = app
        .get("/api/v1/chat/message?client_id=not-a-uuid")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn message_round_trip_between_two_members() {
    let app = TestApp::new(Duration::from_millis(500));

    let join_a = body_json(
        app.post_json("/api/v1/chat/join", r#"{"room_id":"lobby"}"#)
            .await,
    )
    .await;
    let join_b = body_json(
        app.post_json("/api/v1/chat/join", r#"{"room_id":"lobby"}"#)
            .await,
    )
    .await;
    let a = join_a["client_id"].as_str().unwrap().to_owned();
    let b = join_b["client_id"].as_str().unwrap().to_owned();

    let response = app
        .post_json(
            &format!("/api/v1/chat/message?client_id={a}"),
            r#"{"message":"hi"}"#,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The recipient's poll picks up the fanned-out message.
    let response = app.get(&format!("/api/v1/chat/message?client_id={b}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "hi");

    // The sender is excluded from its own fan-out.
    let response = app.get(&format!("/api/v1/chat/message?client_id={a}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "");
}

#[tokio::test]
async fn receive_times_out_with_empty_message() {
    let app = TestApp::new(POLL_TIMEOUT);

    let join = body_json(
        app.post_json("/api/v1/chat/join", r#"{"room_id":"quiet"}"#)
            .await,
    )
    .await;
    let client = join["client_id"].as_str().unwrap().to_owned();

    let response = app
        .get(&format!("/api/v1/chat/message?client_id={client}"))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "");
}

#[tokio::test]
async fn leave_tears_down_the_session() {
    let app = TestApp::new(POLL_TIMEOUT);

    let join = body_json(
        app.post_json("/api/v1/chat/join", r#"{"room_id":"lobby"}"#)
            .await,
    )
    .await;
    let client = join["client_id"].as_str().unwrap().to_owned();

    let response = app
        .post(&format!("/api/v1/chat/leave?client_id={client}"))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(app.registry.client_count(), 0);

    // Leaving again is a no-op.
    let response = app
        .post(&format!("/api/v1/chat/leave?client_id={client}"))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The id no longer routes anywhere.
    let response = app
        .post_json(
            &format!("/api/v1/chat/message?client_id={client}"),
            r#"{"message":"late"}"#,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
