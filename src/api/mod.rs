//! HTTP API module
//!
//! Request handlers, shared state, and router construction.

pub mod chat;
pub mod conversations;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::chat::store::ConversationStore;
use crate::providers::ProviderClient;

/// Shared application state
///
/// Cloned into every handler by axum; both fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// Conversation persistence
    pub store: Arc<dyn ConversationStore>,
    /// Outbound provider adapter
    pub providers: ProviderClient,
}

#[allow(missing_docs)]
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    message: String,
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Build the application router
///
/// Takes the state so tests can drive the complete HTTP surface without
/// binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/chat", post(chat::chat))
        .route(
            "/api/conversations/:id",
            get(conversations::get_conversation),
        )
        .route(
            "/api/conversations/:id/messages",
            get(conversations::get_messages),
        )
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive()) // Allow CORS for development
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: "Backend is healthy".to_string(),
    })
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::chat::memory::MemoryStore;
    use crate::providers::DefaultCredentials;

    AppState {
        store: Arc::new(MemoryStore::new()),
        providers: ProviderClient::new(DefaultCredentials::default()),
    }
}

#[cfg(test)]
pub(crate) fn test_state_with_endpoints(
    endpoints: crate::providers::ProviderEndpoints,
) -> AppState {
    use crate::chat::memory::MemoryStore;
    use crate::providers::DefaultCredentials;

    AppState {
        store: Arc::new(MemoryStore::new()),
        providers: ProviderClient::with_endpoints(DefaultCredentials::default(), endpoints),
    }
}
