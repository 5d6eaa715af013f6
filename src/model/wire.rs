// src/model/wire.rs
//! Field accessors over raw wire documents.
//!
//! The API is trusted to send well-formed objects, but a missing or
//! wrong-typed key still has to surface as an error naming that key rather
//! than a panic deep inside a decoder.

use crate::error::{NotionError, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Returns `obj[key]`, failing if the key is absent.
pub fn field<'a>(obj: &'a Value, key: &str) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| NotionError::MalformedResponse(format!("missing key `{}`", key)))
}

/// Returns the string under `key`, failing if absent or not a string.
pub fn str_field<'a>(obj: &'a Value, key: &str) -> Result<&'a str> {
    field(obj, key)?
        .as_str()
        .ok_or_else(|| wrong_type(key, "a string"))
}

/// Returns the string under `key`, treating absence and `null` as `None`.
pub fn opt_str(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Returns the string under `key`, or an empty string when absent.
pub fn str_or_empty(obj: &Value, key: &str) -> String {
    opt_str(obj, key).unwrap_or_default()
}

pub fn bool_field(obj: &Value, key: &str) -> Result<bool> {
    field(obj, key)?
        .as_bool()
        .ok_or_else(|| wrong_type(key, "a boolean"))
}

pub fn bool_or(obj: &Value, key: &str, default: bool) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(default)
}

pub fn opt_f64(obj: &Value, key: &str) -> Option<f64> {
    obj.get(key).and_then(Value::as_f64)
}

/// Returns the array under `key`, failing if absent or not an array.
pub fn array_field<'a>(obj: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    field(obj, key)?
        .as_array()
        .ok_or_else(|| wrong_type(key, "an array"))
}

/// Returns the array under `key`, or an empty slice when absent or `null`.
pub fn array_or_empty<'a>(obj: &'a Value, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Returns the value under `key` unless it is absent or `null`.
pub fn non_null<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// Parses an RFC 3339 timestamp under `key`.
pub fn timestamp_field(obj: &Value, key: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(str_field(obj, key)?)
}

/// Like [`timestamp_field`] but absence and `null` yield `None`.
pub fn opt_timestamp(obj: &Value, key: &str) -> Result<Option<DateTime<Utc>>> {
    match obj.get(key).and_then(Value::as_str) {
        Some(raw) => parse_timestamp(raw).map(Some),
        None => Ok(None),
    }
}

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| NotionError::MalformedResponse(format!("invalid timestamp `{}`: {}", raw, e)))
}

/// The `type` discriminator of a wire object.
pub fn type_tag(obj: &Value) -> Result<&str> {
    str_field(obj, "type")
}

fn wrong_type(key: &str, expected: &str) -> NotionError {
    NotionError::MalformedResponse(format!("key `{}` is not {}", key, expected))
}
