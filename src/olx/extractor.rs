//! Flattens raw search listings into [`ExtractedListing`] records.

use crate::olx::models::{ExtractedListing, RawListing};
use crate::olx::path::{first_text, text_or_na, NOT_AVAILABLE};
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;
use tracing::{trace, warn};

const PARAM_KEY_FIELDS: &[&str] = &["key_name", "key"];
const PARAM_VALUE_FIELDS: &[&str] = &["formatted_value", "value_name", "value"];
const UNKNOWN_PARAM_KEY: &str = "unknown";

/// Why a single listing could not be flattened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("listing is not a JSON object (got {0})")]
    NotAnObject(&'static str),

    #[error("listing parameters are not a list (got {0})")]
    ParametersNotAList(&'static str),

    #[error("listing parameter #{index} is not a JSON object (got {kind})")]
    ParameterNotAnObject { index: usize, kind: &'static str },
}

/// Flattens one raw listing.
///
/// Missing or oddly-typed nested fields fall back to `"N/A"`; only a
/// listing whose overall shape is wrong is rejected.
pub fn extract(raw: &RawListing) -> Result<ExtractedListing, ExtractError> {
    if !raw.is_object() {
        return Err(ExtractError::NotAnObject(kind_of(raw)));
    }

    let attributes = extract_attributes(raw)?;

    Ok(ExtractedListing {
        ad_id: text_or_na(raw, &["ad_id"]),
        title: text_or_na(raw, &["title"]),
        description: text_or_na(raw, &["description"]),
        price: text_or_na(raw, &["price", "value", "display"]),
        seller_name: text_or_na(raw, &["user_name"]),
        user_type: text_or_na(raw, &["user_type"]),
        city: text_or_na(raw, &["locations_resolved", "ADMIN_LEVEL_3_name"]),
        state: text_or_na(raw, &["locations_resolved", "ADMIN_LEVEL_1_name"]),
        area: text_or_na(raw, &["locations_resolved", "SUBLOCALITY_LEVEL_1_name"]),
        created_at: text_or_na(raw, &["created_at"]),
        attributes,
    })
}

/// Flattens every listing, dropping (and logging) the ones that fail.
pub fn extract_all(raws: &[RawListing]) -> Vec<ExtractedListing> {
    raws.iter()
        .enumerate()
        .filter_map(|(i, raw)| match extract(raw) {
            Ok(listing) => Some(listing),
            Err(e) => {
                warn!("Error extracting listing data (#{}): {}", i + 1, e);
                None
            }
        })
        .collect()
}

// Later duplicates of the same key overwrite earlier ones but keep the
// position where the key first appeared.
fn extract_attributes(raw: &Value) -> Result<IndexMap<String, String>, ExtractError> {
    let mut attributes = IndexMap::new();

    let params = match raw.get("parameters") {
        None | Some(Value::Null) => return Ok(attributes),
        Some(Value::Array(params)) => params,
        Some(other) => return Err(ExtractError::ParametersNotAList(kind_of(other))),
    };

    for (index, param) in params.iter().enumerate() {
        if !param.is_object() {
            return Err(ExtractError::ParameterNotAnObject { index, kind: kind_of(param) });
        }

        let key = first_text(param, PARAM_KEY_FIELDS)
            .unwrap_or_else(|| UNKNOWN_PARAM_KEY.to_string());
        let value =
            first_text(param, PARAM_VALUE_FIELDS).unwrap_or_else(|| NOT_AVAILABLE.to_string());

        if let Some(previous) = attributes.insert(key.clone(), value) {
            trace!("Attribute {} overwritten (was {})", key, previous);
        }
    }

    Ok(attributes)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
