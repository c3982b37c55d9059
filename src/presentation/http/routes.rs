//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    // Gauges are sampled at scrape time from the registry.
    metrics::ACTIVE_CLIENTS.set(state.registry.client_count() as i64);
    metrics::ACTIVE_ROOMS.set(state.registry.room_count() as i64);

    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics::gather_metrics(),
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new().nest("/chat", chat_routes())
}

/// Long-polling chat routes
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/join", post(handlers::chat::join_room))
        .route(
            "/message",
            post(handlers::chat::send_message).get(handlers::chat::receive_message),
        )
        .route("/leave", post(handlers::chat::leave_room))
}
