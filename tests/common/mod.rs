//! Common Test Utilities
//!
//! Shared helpers and test infrastructure.

use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use tower::ServiceExt;

use chat_relay::config::{CorsSettings, RelaySettings, ServerSettings, Settings};
use chat_relay::presentation::http::routes;
use chat_relay::relay::RoomRegistry;
use chat_relay::startup::AppState;

/// Test application wrapping the real router with an in-process relay
pub struct TestApp {
    pub router: Router,
    pub registry: Arc<RoomRegistry>,
}

impl TestApp {
    /// Create a test application with the given long-poll timeout.
    ///
    /// Tests use sub-second timeouts so long-poll expiry paths finish
    /// quickly; the registry is built directly rather than through
    /// `Settings::load` to allow that.
    pub fn new(receive_timeout: Duration) -> Self {
        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".into(),
                port: 0,
            },
            relay: RelaySettings {
                receive_timeout_secs: receive_timeout.as_secs(),
            },
            cors: CorsSettings {
                allowed_origins: vec![],
            },
            environment: "test".into(),
        };

        let registry = Arc::new(RoomRegistry::new(receive_timeout));
        let state = AppState {
            registry: Arc::clone(&registry),
            settings: Arc::new(settings),
        };

        Self {
            router: routes::create_router(state),
            registry,
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with no body
    pub async fn post(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Read a response body as JSON
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
