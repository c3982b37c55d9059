//! Chat Handlers
//!
//! The long-polling chat API: join a room, post a message to the other
//! members, poll for the next message, leave. All four map directly
//! onto relay registry operations; this layer only parses ids, shapes
//! JSON, and translates relay errors into HTTP responses.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::relay::{ClientId, RelayError, RoomId};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Join request body
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub room_id: String,
}

/// Join response body
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub client_id: ClientId,
}

/// Query parameters identifying the calling client
#[derive(Debug, Deserialize)]
pub struct ClientQuery {
    pub client_id: String,
}

/// Send message request body
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

/// Received message response body. An empty message means the
/// long-poll timed out and the client should poll again.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_client_id(raw: &str) -> Result<ClientId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid client_id".into()))
}

fn map_relay_error(error: RelayError) -> AppError {
    match error {
        RelayError::ClientNotFound(_) => AppError::NotFound(error.to_string()),
        error => AppError::Internal(error.to_string()),
    }
}

/// Join a room, creating it on first use
pub async fn join_room(
    State(state): State<AppState>,
    Json(body): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, AppError> {
    if body.room_id.is_empty() {
        return Err(AppError::BadRequest("room_id must not be empty".into()));
    }

    let client_id = state
        .registry
        .enter(RoomId::new(body.room_id))
        .map_err(map_relay_error)?;

    Ok(Json(JoinResponse { client_id }))
}

/// Post a message to every other member of the caller's room
pub async fn send_message(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
    Json(body): Json<SendMessageRequest>,
) -> Result<StatusCode, AppError> {
    let client_id = parse_client_id(&query.client_id)?;

    state
        .registry
        .send_message(client_id, body.message)
        .map_err(map_relay_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Long-poll for the next message
pub async fn receive_message(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let client_id = parse_client_id(&query.client_id)?;

    let message = state
        .registry
        .receive_message(client_id)
        .await
        .map_err(map_relay_error)?;

    Ok(Json(MessageResponse { message }))
}

/// Leave the current room; idempotent
pub async fn leave_room(
    State(state): State<AppState>,
    Query(query): Query<ClientQuery>,
) -> Result<StatusCode, AppError> {
    let client_id = parse_client_id(&query.client_id)?;

    state.registry.leave(client_id);

    Ok(StatusCode::NO_CONTENT)
}
