//! Handler for the callback invocation endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::Value;

use super::{ApiState, BridgeError};
use crate::models::BridgeRequest;

/// Receives a JSON payload naming a script and a callback, invokes the
/// callback and returns its value as the raw response body.
///
/// The body is taken as raw bytes rather than through the JSON extractor so
/// that malformed payloads produce the wire-level `invalid payload` response
/// instead of an extractor rejection.
pub async fn invoke(
    State(state): State<ApiState>,
    body: Bytes,
) -> Result<impl IntoResponse, BridgeError> {
    let outcome = dispatch(&state, &body).await;
    state.metrics.record_invocation(outcome.is_err()).await;

    let value = outcome?;
    Ok((StatusCode::OK, Json(value)))
}

/// Runs the decode, validate, load, invoke pipeline for one request.
async fn dispatch(state: &ApiState, body: &[u8]) -> Result<Value, BridgeError> {
    let request = BridgeRequest::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "Rejected malformed payload");
        BridgeError::InvalidPayload
    })?;
    let BridgeRequest { script_file, callback, params, context } = request;

    let script_path = state.config.resolve_script_path(&script_file).ok_or_else(|| {
        tracing::debug!(script_file = %script_file, "Script file missing or not a regular file");
        BridgeError::ScriptNotFound
    })?;

    state
        .executor
        .run_callback(&script_path, &callback, params, context)
        .await
        .map_err(|err| {
            tracing::debug!(
                script = %script_path.display(),
                callback = %callback,
                error = %err,
                "Invocation failed"
            );
            BridgeError::from(err)
        })
}
