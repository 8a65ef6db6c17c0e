//! Backend payload normalization.
//!
//! The backend has used several names for the same field over time. Each
//! feature declares one alias table mapping every known name onto a canonical
//! field; [`canonicalize`] applies it once at the boundary so the rest of the
//! crate only ever sees canonical names.

pub mod qa;
pub mod search;
pub mod uploader;

pub use qa::{normalize_answer, normalize_citation};
pub use search::normalize_search;
pub use uploader::{normalize_ingest, normalize_stored_files};

use serde_json::{Map, Value};

/// Canonical field name and the backend names it may arrive under, in
/// priority order.
#[derive(Debug, Clone, Copy)]
pub struct FieldAlias {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Re-key `value` by canonical field names.
///
/// For each canonical field the first alias present with a non-null value
/// wins. Fields not in the table are dropped. Non-objects yield an empty map.
pub fn canonicalize(value: &Value, table: &[FieldAlias]) -> Map<String, Value> {
    let mut out = Map::new();
    let Some(obj) = value.as_object() else {
        return out;
    };
    for field in table {
        let found = field
            .aliases
            .iter()
            .filter_map(|alias| obj.get(*alias))
            .find(|v| !v.is_null());
        if let Some(v) = found {
            out.insert(field.canonical.to_string(), v.clone());
        }
    }
    out
}

/// A string field; numbers are rendered, anything else is empty.
pub(crate) fn string_field(map: &Map<String, Value>, key: &str) -> String {
    opt_string_field(map, key).unwrap_or_default()
}

pub(crate) fn opt_string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A float field; numeric strings are accepted.
pub(crate) fn f64_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    match map.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// A non-negative integer field; numeric strings and integral floats are accepted.
pub(crate) fn u64_field(map: &Map<String, Value>, key: &str) -> Option<u64> {
    match map.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn u32_field(map: &Map<String, Value>, key: &str) -> Option<u32> {
    u64_field(map, key).and_then(|n| u32::try_from(n).ok())
}

/// A 1-based page number; zero is treated as absent.
pub(crate) fn page_field(map: &Map<String, Value>, key: &str) -> Option<u32> {
    u32_field(map, key).filter(|p| *p >= 1)
}

pub(crate) fn bool_field(map: &Map<String, Value>, key: &str) -> Option<bool> {
    match map.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Clamp a score into [0, 1].
pub(crate) fn unit_score(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}
