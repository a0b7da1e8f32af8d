//! Safe lookups over loosely-shaped JSON.

use serde_json::Value;

/// Placeholder for fields the API did not send.
pub const NOT_AVAILABLE: &str = "N/A";

/// Follows `segments` through nested objects.
///
/// Returns `None` as soon as a segment is missing, a non-object is hit
/// midway, or the final value is `null`.
pub fn lookup<'a>(value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for segment in segments {
        current = current.as_object()?.get(*segment)?;
    }
    if current.is_null() {
        None
    } else {
        Some(current)
    }
}

/// Renders a JSON value as display text.
///
/// Strings are taken verbatim, everything else uses its compact JSON form.
pub fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Text at `segments`, or [`NOT_AVAILABLE`].
pub fn text_or_na(value: &Value, segments: &[&str]) -> String {
    lookup(value, segments).map(as_text).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// First of `keys` present on `value`, rendered as text.
pub fn first_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| lookup(value, &[key])).map(as_text)
}
