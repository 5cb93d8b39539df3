//! Defines the wire-level `BridgeError` type for the HTTP server.
//!
//! The external harness asserts on exact error strings, so every fault in
//! the invocation pipeline converges to one of six stable kinds. Errors are
//! reported over the wire as HTTP 200 with a one-key JSON object; detail
//! beyond the kind goes to the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::Value;

use crate::engine::ScriptExecutorError;

/// The JSON key carrying the error kind in failure responses.
pub const BRIDGE_ERROR_KEY: &str = "__neutralts_obj_error";

/// A bridge failure as reported to the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// The request body was not parseable JSON or not an object.
    InvalidPayload,

    /// The requested script file was missing, empty, or not a regular file.
    ScriptNotFound,

    /// Reading, compiling, or evaluating the script raised a fault.
    ScriptLoadFailed,

    /// No public script function matched the callback name.
    CallbackNotFound,

    /// Invoking the callback raised a fault.
    CallbackExecutionFailed,

    /// The callback's return value could not be represented as JSON.
    InvalidCallbackResponse,
}

impl BridgeError {
    /// The stable kind string for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::InvalidPayload => "invalid payload",
            BridgeError::ScriptNotFound => "obj script not found",
            BridgeError::ScriptLoadFailed => "script load failed",
            BridgeError::CallbackNotFound => "callback not found",
            BridgeError::CallbackExecutionFailed => "callback execution failed",
            BridgeError::InvalidCallbackResponse => "invalid callback response",
        }
    }
}

/// Converts a `ScriptExecutorError` into a `BridgeError`.
///
/// This allows for the convenient use of the `?` operator in handlers on
/// functions that return `Result<_, ScriptExecutorError>`.
impl From<ScriptExecutorError> for BridgeError {
    fn from(err: ScriptExecutorError) -> Self {
        match err {
            ScriptExecutorError::ReadScript { .. }
            | ScriptExecutorError::Compile(_)
            | ScriptExecutorError::Load(_) => BridgeError::ScriptLoadFailed,
            ScriptExecutorError::CallbackNotFound(_) => BridgeError::CallbackNotFound,
            ScriptExecutorError::CallbackFailed { .. } | ScriptExecutorError::Task(_) =>
                BridgeError::CallbackExecutionFailed,
            ScriptExecutorError::InvalidReturn(_) => BridgeError::InvalidCallbackResponse,
        }
    }
}

/// Implements the conversion from `BridgeError` into an `axum` response.
///
/// This is the central point for mapping invocation failures to the wire
/// protocol: always HTTP 200 with `{"__neutralts_obj_error": "<kind>"}`.
impl IntoResponse for BridgeError {
    fn into_response(self) -> axum::response::Response {
        let mut body = serde_json::Map::with_capacity(1);
        body.insert(BRIDGE_ERROR_KEY.to_string(), Value::String(self.kind().to_string()));

        (StatusCode::OK, Json(Value::Object(body))).into_response()
    }
}
