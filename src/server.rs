//! HTTP shell: liveness, the interactions webhook, and a 404 fallback.

use crate::interactions::{self, Reply};
use crate::security;
use crate::store::JobStore;
use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use ed25519_dalek::VerifyingKey;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Everything a request needs. Read-only, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub application_id: String,
    pub public_key: VerifyingKey,
    pub store: Arc<dyn JobStore>,
    /// Used to download command attachments
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(
        application_id: impl Into<String>,
        public_key: VerifyingKey,
        store: Arc<dyn JobStore>,
        http: reqwest::Client,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            public_key,
            store,
            http,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(liveness).post(handle_interaction).fallback(not_found),
        )
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind `0.0.0.0:port` and serve until Ctrl+C.
pub async fn serve(port: u16, state: AppState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("✓ Listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn liveness(State(state): State<Arc<AppState>>) -> String {
    format!("👋 {}", state.application_id)
}

async fn handle_interaction(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let interaction = match security::verify_request(&state.public_key, &headers, &body) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!("Rejected interaction request: {}", e);
            return (StatusCode::UNAUTHORIZED, "Bad request signature.").into_response();
        }
    };

    info!("Received interaction {}", interaction.id);

    match interactions::dispatch(&state, interaction).await {
        Reply::Respond(response) => Json(response).into_response(),
        Reply::UnknownInteraction => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Unknown Type" })),
        )
            .into_response(),
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found.")
}
