//! Data conversion between JSON values and script engine types.
//!
//! Request data flows into scripts through [`json_to_dynamic`]; callback
//! return values flow back through [`dynamic_to_json`]. The return direction
//! is fallible: scripts can produce values with no JSON representation
//! (non-finite floats, engine-internal types) and those must surface as
//! errors rather than be silently stringified.

use rhai::{Dynamic, Map};
use serde_json::{Number, Value};
use thiserror::Error;

/// Errors that can occur converting a script value to JSON.
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// The value's type has no JSON representation.
    #[error("value of type '{0}' cannot be represented as JSON")]
    UnsupportedType(&'static str),

    /// A float was NaN or infinite.
    #[error("non-finite number {0} cannot be represented as JSON")]
    NonFiniteNumber(f64),
}

/// Converts a JSON value to a script `Dynamic` value.
///
/// Unsigned integers beyond i64 range are converted to strings to preserve
/// their value.
pub fn json_to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => (*b).into(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into()
            } else if let Some(u) = n.as_u64() {
                // u64 values above i64::MAX have no native script integer.
                if u <= i64::MAX as u64 {
                    (u as i64).into()
                } else {
                    u.to_string().into()
                }
            } else if let Some(f) = n.as_f64() {
                f.into()
            } else {
                n.to_string().into()
            }
        }
        Value::String(s) => s.clone().into(),
        Value::Array(arr) => {
            let items: Vec<Dynamic> = arr.iter().map(json_to_dynamic).collect();
            items.into()
        }
        Value::Object(obj) => {
            let mut map = Map::new();
            for (k, v) in obj {
                map.insert(k.clone().into(), json_to_dynamic(v));
            }
            map.into()
        }
    }
}

/// Converts a script `Dynamic` value to JSON.
pub fn dynamic_to_json(value: &Dynamic) -> Result<Value, ConversionError> {
    if value.is_unit() {
        return Ok(Value::Null);
    }

    if let Some(result) = try_convert_primitive(value) {
        return result;
    }

    if let Some(result) = try_convert_array(value) {
        return result;
    }

    if let Some(result) = try_convert_map(value) {
        return result;
    }

    Err(ConversionError::UnsupportedType(value.type_name()))
}

/// Attempts to convert a `Dynamic` to a JSON primitive type.
fn try_convert_primitive(value: &Dynamic) -> Option<Result<Value, ConversionError>> {
    if let Ok(b) = value.as_bool() {
        Some(Ok(Value::Bool(b)))
    } else if value.is_int() {
        value.as_int().ok().map(|i| Ok(Value::Number(Number::from(i))))
    } else if value.is_float() {
        let f = value.as_float().ok()?;
        Some(Number::from_f64(f).map(Value::Number).ok_or(ConversionError::NonFiniteNumber(f)))
    } else if value.is_char() {
        value.as_char().ok().map(|c| Ok(Value::String(c.to_string())))
    } else if value.is_string() {
        value.clone().into_string().ok().map(|s| Ok(Value::String(s)))
    } else {
        None
    }
}

/// Attempts to convert a `Dynamic` array to a JSON array.
fn try_convert_array(value: &Dynamic) -> Option<Result<Value, ConversionError>> {
    value.read_lock::<Vec<Dynamic>>().map(|arr| {
        let items: Result<Vec<Value>, ConversionError> = arr.iter().map(dynamic_to_json).collect();
        items.map(Value::Array)
    })
}

/// Attempts to convert a `Dynamic` map to a JSON object.
fn try_convert_map(value: &Dynamic) -> Option<Result<Value, ConversionError>> {
    value.read_lock::<Map>().map(|map| {
        let mut object = serde_json::Map::with_capacity(map.len());
        for (key, entry) in map.iter() {
            object.insert(key.to_string(), dynamic_to_json(entry)?);
        }
        Ok(Value::Object(object))
    })
}
