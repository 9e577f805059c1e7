//! Document identity hashing for DISTINCT de-duplication
//!
//! The identity of a document is a combined hash of two independent hash
//! functions over its canonical JSON form, keeping the probability of an
//! accidental collision negligible. serde_json objects are backed by an
//! ordered map, so serializing a parsed value yields a canonical form with
//! deterministic key order.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Combined identity of one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentDigest {
    crc: u32,
    sha: [u8; 32],
}

/// Computes the combined digest of a JSON value.
pub fn digest(value: &Value) -> DocumentDigest {
    let canonical = value.to_string();
    let bytes = canonical.as_bytes();

    let mut sha = [0u8; 32];
    sha.copy_from_slice(&Sha256::digest(bytes));

    DocumentDigest {
        crc: crc32fast::hash(bytes),
        sha,
    }
}
