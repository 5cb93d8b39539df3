//! HTTP server module

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

mod bridge;
mod error;
mod status;

pub use bridge::invoke;
pub use error::{BRIDGE_ERROR_KEY, BridgeError};
pub use status::{StatusResponse, status};

use crate::{config::AppConfig, engine::ScriptExecutor, metrics::AppMetrics};

/// Shared state available to all API handlers.
#[derive(Clone)]
pub struct ApiState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// The executor that loads scripts and runs callbacks.
    pub executor: Arc<ScriptExecutor>,
    /// Shared application metrics.
    pub metrics: AppMetrics,
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Runs the HTTP server based on the provided application configuration.
pub async fn run_server_from_config(
    config: Arc<AppConfig>,
    executor: Arc<ScriptExecutor>,
    metrics: AppMetrics,
) {
    let addr: SocketAddr =
        config.server.listen_address.parse().expect("Invalid server.listen_address format");

    let state = ApiState { config, executor, metrics };

    let app = Router::new()
        .route("/", post(invoke))
        .route("/health", get(health))
        .route("/status", get(status))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind address");

    tracing::info!(address = %addr, "Bridge server listening");

    axum::serve(listener, app.into_make_service()).await.expect("Server failed");
}
