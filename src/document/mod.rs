//! Untyped JSON document utilities
//!
//! Documents are modeled as `serde_json::Value` rather than reflected into
//! native types, so the engine can hash, compare, and re-serialize arbitrary
//! documents without schema knowledge.

mod compare;
mod convert;
mod hash;

pub use compare::compare_values;
pub use convert::{array_field, number_field, object_field, string_field, ConvertError};
pub use hash::{digest, DocumentDigest};
