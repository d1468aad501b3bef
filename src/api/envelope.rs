//! Typed decoding of the `{ data: { <key>: T } }` response envelope.
//!
//! Every endpoint names the key it expects and gets back a typed value or
//! an `ApiError`, so callers never reach into raw JSON themselves.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Decode `body.data.<key>` as `T`.
pub fn unwrap<T: DeserializeOwned>(body: Value, key: &'static str) -> Result<T, ApiError> {
    let mut inner = take_data(body, key)?;
    normalize_ids(&mut inner);
    serde_json::from_value(inner).map_err(|source| ApiError::Decode { key, source })
}

/// Decode a body that is not wrapped in `data` (auth responses, acks).
pub fn decode<T: DeserializeOwned>(mut body: Value, key: &'static str) -> Result<T, ApiError> {
    if let Some(data) = body.get_mut("data") {
        for value in data.as_object_mut().into_iter().flat_map(|m| m.values_mut()) {
            normalize_ids(value);
        }
    }
    serde_json::from_value(body).map_err(|source| ApiError::Decode { key, source })
}

fn take_data(body: Value, key: &'static str) -> Result<Value, ApiError> {
    let Value::Object(mut root) = body else {
        return Err(ApiError::MissingKey { key });
    };
    let Some(Value::Object(mut data)) = root.remove("data") else {
        return Err(ApiError::MissingKey { key });
    };
    match data.remove(key) {
        Some(Value::Null) | None => Err(ApiError::MissingKey { key }),
        Some(value) => Ok(value),
    }
}

/// Fold MongoDB-style `_id` into `id` on a document or a list of documents.
///
/// When both are present `id` is kept and `_id` dropped.
fn normalize_ids(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(normalize_document),
        Value::Object(_) => normalize_document(value),
        _ => {}
    }
}

fn normalize_document(value: &mut Value) {
    let Value::Object(map) = value else {
        return;
    };
    if let Some(object_id) = map.remove("_id") {
        map.entry("id").or_insert(object_id);
    }
}
