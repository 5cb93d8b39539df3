//! This module contains the data models for the bridge.

use rhai::{Dynamic, Map};
use serde_json::Value;
use thiserror::Error;

use crate::engine::conversions::json_to_dynamic;

/// An error that occurs while decoding a request payload.
#[derive(Debug, Error)]
pub enum RequestParseError {
    /// The body is not valid JSON.
    #[error("request body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The body parsed but is not a JSON object.
    #[error("request body is not a JSON object")]
    NotAnObject,
}

/// Ambient values forwarded to a callback as its optional second argument.
#[derive(Debug, Clone, Default)]
pub struct CallbackContext {
    /// The `schema` value from the request, or null.
    pub schema: Value,
    /// The `schema_data` value from the request, or null.
    pub schema_data: Value,
}

impl CallbackContext {
    /// Builds the map handed to two-argument callbacks, with keys `schema`
    /// and `schema_data`.
    pub fn into_dynamic(self) -> Dynamic {
        let mut map = Map::new();
        map.insert("schema".into(), json_to_dynamic(&self.schema));
        map.insert("schema_data".into(), json_to_dynamic(&self.schema_data));
        Dynamic::from_map(map)
    }
}

/// A decoded invocation request.
///
/// Field extraction is deliberately lenient: missing or null fields take
/// their defaults, and wrongly-typed fields degrade to values that fail the
/// corresponding later check rather than rejecting the payload outright.
#[derive(Debug, Clone)]
pub struct BridgeRequest {
    /// Path of the script to load; empty when absent or not a string, which
    /// fails path validation.
    pub script_file: String,
    /// Name of the function to invoke. Defaults to `main` when absent or
    /// null; a non-string value becomes an empty name, which no script
    /// function can match, so resolution fails only after the script loads.
    pub callback: String,
    /// The parameter bag passed to the callback. Defaults to an empty
    /// object when absent or null.
    pub params: Value,
    /// Ambient values visible to the callback for this request only.
    pub context: CallbackContext,
}

impl BridgeRequest {
    /// Decodes a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestParseError> {
        let payload: Value = serde_json::from_slice(body)?;
        let Value::Object(fields) = payload else {
            return Err(RequestParseError::NotAnObject);
        };

        let script_file = match fields.get("script_file") {
            Some(Value::String(s)) => s.clone(),
            _ => String::new(),
        };

        let callback = match fields.get("callback") {
            None | Some(Value::Null) => "main".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(_) => String::new(),
        };

        let params = match fields.get("params") {
            None | Some(Value::Null) => Value::Object(serde_json::Map::new()),
            Some(value) => value.clone(),
        };

        let context = CallbackContext {
            schema: fields.get("schema").cloned().unwrap_or(Value::Null),
            schema_data: fields.get("schema_data").cloned().unwrap_or(Value::Null),
        };

        Ok(Self { script_file, callback, params, context })
    }
}
