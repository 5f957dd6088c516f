//! Metadata-bag semantics.
//!
//! Entities carry a free-form JSON object column for loosely structured,
//! evolvable attributes. This module implements the shallow merge used by
//! partial updates and the tolerant string-list accessors used for
//! favorites and subscriptions.
//!
//! Reads are defensive: a missing or wrong-typed key is treated as absent,
//! never as an error. Writes go through [`merge`], which is the only place
//! that rejects a malformed bag.

use serde_json::{Map, Value};

use crate::domain::errors::{ServiceError, ServiceResult};

/// Shallow-merge `patch` into `existing`.
///
/// Every top-level key present in `patch` overwrites the corresponding key
/// in `existing`; keys absent from `patch` are preserved. Nested objects
/// are replaced wholesale, not deep-merged. An absent `existing` bag is
/// treated as the empty object.
///
/// Fails with `MalformedMetadata` when either present input is not a JSON
/// object.
pub fn merge(existing: Option<&Value>, patch: &Value) -> ServiceResult<Value> {
    let mut merged: Map<String, Value> = match existing {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map.clone(),
        Some(other) => {
            return Err(ServiceError::MalformedMetadata(format!(
                "existing metadata is not a JSON object (found {})",
                json_kind(other)
            )));
        }
    };

    let Value::Object(patch) = patch else {
        return Err(ServiceError::MalformedMetadata(format!(
            "metadata patch is not a JSON object (found {})",
            json_kind(patch)
        )));
    };

    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }

    Ok(Value::Object(merged))
}

/// Read `key` from the bag as an ordered, de-duplicated list of strings.
///
/// Historical data was written in more than one encoding: a homogeneous
/// string array, or a mixed-type array. Both are accepted and normalized
/// here; downstream code never branches on shape again. Entries that have
/// no usable string form (nulls, nested arrays/objects) are skipped.
pub fn string_list(bag: Option<&Value>, key: &str) -> Vec<String> {
    let Some(Value::Array(items)) = bag.and_then(|b| b.get(key)) else {
        return Vec::new();
    };

    let mut list: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let entry = match item {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => continue,
        };
        if !list.contains(&entry) {
            list.push(entry);
        }
    }
    list
}

/// Set-insert `value` into the string list under `key`, returning the
/// updated bag. Idempotent: adding a present member leaves the list
/// unchanged. An absent bag or key is established as needed.
pub fn list_add(bag: Option<&Value>, key: &str, value: &str) -> ServiceResult<Value> {
    let mut list = string_list(bag, key);
    if !list.iter().any(|entry| entry == value) {
        list.push(value.to_string());
    }
    write_list(bag, key, list)
}

/// Remove `value` from the string list under `key`, returning the updated
/// bag. Total and idempotent: removing a non-member succeeds and leaves
/// the list unchanged; an absent key is established as an empty list.
pub fn list_remove(bag: Option<&Value>, key: &str, value: &str) -> ServiceResult<Value> {
    let mut list = string_list(bag, key);
    list.retain(|entry| entry != value);
    write_list(bag, key, list)
}

/// Read `key` as a non-empty string. Missing, empty, or wrong-typed keys
/// read as absent.
pub fn string_value(bag: Option<&Value>, key: &str) -> Option<String> {
    bag.and_then(|b| b.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Read `key` as a boolean. Missing or wrong-typed keys read as absent.
pub fn bool_value(bag: Option<&Value>, key: &str) -> Option<bool> {
    bag.and_then(|b| b.get(key)).and_then(Value::as_bool)
}

/// Read `key` as a flag, defaulting to `false` when absent. The string
/// encodings `"true"`/`"false"` are accepted alongside JSON booleans.
pub fn flag(bag: Option<&Value>, key: &str) -> bool {
    match bag.and_then(|b| b.get(key)) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

fn write_list(bag: Option<&Value>, key: &str, list: Vec<String>) -> ServiceResult<Value> {
    let patch = Value::Object(Map::from_iter([(
        key.to_string(),
        Value::Array(list.into_iter().map(Value::String).collect()),
    )]));
    merge(bag, &patch)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
