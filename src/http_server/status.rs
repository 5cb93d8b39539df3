//! Represents the `/status` endpoint handler and response structure.
//! Provides application status and metrics.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;

use super::ApiState;

/// Represents the response from the `/status` endpoint.
#[derive(Debug, Serialize, Clone)]
pub struct StatusResponse {
    /// The version of the application.
    pub version: String,
    /// The uptime of the application in seconds.
    pub uptime_secs: u64,
    /// The number of invocation requests handled.
    pub invocations: u64,
    /// The number of invocation requests that ended in a bridge error.
    pub failures: u64,
}

/// Retrieves application status and metrics.
pub async fn status(State(state): State<ApiState>) -> impl IntoResponse {
    let metrics = state.metrics.metrics.read().await;
    let response = StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: metrics.start_time.elapsed().as_secs(),
        invocations: metrics.invocations,
        failures: metrics.failures,
    };
    (StatusCode::OK, Json(response))
}
