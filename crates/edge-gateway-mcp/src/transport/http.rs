//! HTTP transport: `POST /mcp` plus `/health`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json as AxumJson, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::protocol::ProtocolHandler;
use crate::types::{McpError, McpResult, SERVER_VERSION};

/// HTTP transport for MCP clients and the tenant router.
pub struct HttpTransport {
    handler: Arc<ProtocolHandler>,
}

impl HttpTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Run the HTTP server on the given address.
    pub async fn run(&self, addr: &str) -> McpResult<()> {
        let app = router(self.handler.clone());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(McpError::Io)?;

        tracing::info!("HTTP transport listening on {addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?;

        Ok(())
    }
}

/// Build the router. Only `POST /mcp` reaches the dispatcher; everything else is a 404.
pub fn router(handler: Arc<ProtocolHandler>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/mcp", post(handle_request).fallback(not_found))
        .route("/health", get(handle_health))
        .fallback(not_found)
        .layer(cors)
        .with_state(handler)
}

async fn handle_request(State(handler): State<Arc<ProtocolHandler>>, body: Bytes) -> Response {
    let reply = handler.handle_bytes(&body).await;
    let status = StatusCode::from_u16(reply.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match reply.body() {
        Some(envelope) => (status, AxumJson(envelope)).into_response(),
        None => status.into_response(),
    }
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        AxumJson(serde_json::json!({ "error": "not_found" })),
    )
        .into_response()
}

/// Health check endpoint.
async fn handle_health(State(handler): State<Arc<ProtocolHandler>>) -> AxumJson<serde_json::Value> {
    AxumJson(serde_json::json!({
        "status": "ok",
        "version": SERVER_VERSION,
        "nodes_configured": handler.directory().entries().len(),
    }))
}
