//! Lenient decoding of structured-text columns.
//!
//! Bullet points, keywords and product details are stored as JSON text.
//! Rows written by older versions may hold nulls, double-encoded strings or
//! plain garbage. Every read goes through here and falls back to a fixed
//! default per shape: sequence → `[]`, mapping → `{}`, text → `""`.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use listing_extraction::ProductDetails;

/// Decode a JSON sequence of strings. Non-string items are kept in their
/// JSON text form; nulls are dropped.
pub fn sequence(column: &str, raw: Option<&str>) -> Vec<String> {
    match parse(column, raw) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(other) => {
            warn!(column, kind = kind(&other), "Expected JSON array, using default");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Decode a JSON object of attribute name → value, preserving key order.
pub fn mapping(column: &str, raw: Option<&str>) -> ProductDetails {
    match parse(column, raw) {
        Some(Value::Object(entries)) => entries
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Null => None,
                other => Some((key, other.to_string())),
            })
            .collect(),
        Some(other) => {
            warn!(column, kind = kind(&other), "Expected JSON object, using default");
            ProductDetails::new()
        }
        None => ProductDetails::new(),
    }
}

/// Nullable text column.
pub fn text(raw: Option<String>) -> String {
    raw.unwrap_or_default()
}

/// Encode a value for a structured-text column.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> String {
    // Vec<String> and string-keyed maps always serialize.
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

fn parse(column: &str, raw: Option<&str>) -> Option<Value> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match serde_json::from_str::<Value>(raw) {
        // Double-encoded by a legacy writer: unwrap one level.
        Ok(Value::String(inner)) => match serde_json::from_str::<Value>(&inner) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(column, error = %e, "Undecodable nested JSON, using default");
                None
            }
        },
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            warn!(column, error = %e, "Undecodable JSON, using default");
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
