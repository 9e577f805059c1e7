//! Explicit typed-field extraction from untyped documents
//!
//! A small conversion utility keyed by field name and expected kind,
//! returning a typed value or a conversion failure. The merge layer uses it
//! to unpack the `orderByItems` / `groupByItems` / `payload` wrappers of
//! rewritten rows.

use serde_json::{Map, Value};
use thiserror::Error;

/// A field lookup or kind mismatch failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The document has no such field (or is not an object)
    #[error("field '{0}' is missing")]
    Missing(String),

    /// The field exists but holds a different kind of value
    #[error("field '{field}' is not a {expected}")]
    WrongKind {
        field: String,
        expected: &'static str,
    },
}

/// Extracts a string field.
pub fn string_field<'a>(doc: &'a Value, field: &str) -> Result<&'a str, ConvertError> {
    lookup(doc, field)?
        .as_str()
        .ok_or_else(|| wrong_kind(field, "string"))
}

/// Extracts a numeric field as f64.
pub fn number_field(doc: &Value, field: &str) -> Result<f64, ConvertError> {
    lookup(doc, field)?
        .as_f64()
        .ok_or_else(|| wrong_kind(field, "number"))
}

/// Extracts an array field.
pub fn array_field<'a>(doc: &'a Value, field: &str) -> Result<&'a Vec<Value>, ConvertError> {
    lookup(doc, field)?
        .as_array()
        .ok_or_else(|| wrong_kind(field, "array"))
}

/// Extracts an object field.
pub fn object_field<'a>(doc: &'a Value, field: &str) -> Result<&'a Map<String, Value>, ConvertError> {
    lookup(doc, field)?
        .as_object()
        .ok_or_else(|| wrong_kind(field, "object"))
}

fn lookup<'a>(doc: &'a Value, field: &str) -> Result<&'a Value, ConvertError> {
    doc.get(field)
        .ok_or_else(|| ConvertError::Missing(field.to_string()))
}

fn wrong_kind(field: &str, expected: &'static str) -> ConvertError {
    ConvertError::WrongKind {
        field: field.to_string(),
        expected,
    }
}
