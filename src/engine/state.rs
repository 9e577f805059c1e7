//! Cross-partition continuation state
//!
//! A map from partition key range id to that range's opaque gateway token.
//! An absent entry means the range is fully drained; an empty-string token
//! means "start this range from the beginning". The encoded form handed to
//! callers is a plain JSON object, and the empty state encodes to the empty
//! string, mirroring the gateway's own token convention.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::transport::PartitionKeyRange;

/// Where each partition key range stands within a paginated query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContinuationState {
    tokens: BTreeMap<String, String>,
}

impl ContinuationState {
    /// Seeds a fresh state: every catalog range pending, from the beginning.
    pub fn seed(ranges: &[PartitionKeyRange]) -> Self {
        Self {
            tokens: ranges
                .iter()
                .map(|range| (range.id.clone(), String::new()))
                .collect(),
        }
    }

    /// Decodes a caller-supplied token.
    ///
    /// Returns `None` for the empty string or anything that is not a JSON
    /// object of string tokens; the caller reseeds from the range catalog.
    pub fn decode(encoded: &str) -> Option<Self> {
        if encoded.is_empty() {
            return None;
        }
        let value: Value = serde_json::from_str(encoded).ok()?;
        let object = value.as_object()?;

        let mut tokens = BTreeMap::new();
        for (id, token) in object {
            tokens.insert(id.clone(), token.as_str()?.to_string());
        }
        Some(Self { tokens })
    }

    /// Encodes the state for the caller; empty when nothing is pending.
    pub fn encode(&self) -> String {
        if self.tokens.is_empty() {
            return String::new();
        }
        let map: serde_json::Map<String, Value> = self
            .tokens
            .iter()
            .map(|(id, token)| (id.clone(), Value::String(token.clone())))
            .collect();
        Value::Object(map).to_string()
    }

    /// Drops entries whose range id is not in the current catalog.
    ///
    /// A token minted before a partition split can carry ids the catalog no
    /// longer lists; without pruning those entries would never drain and the
    /// encoded token would never empty out.
    pub fn prune_to_catalog(&mut self, ranges: &[PartitionKeyRange]) {
        self.tokens
            .retain(|id, _| ranges.iter().any(|range| range.id == *id));
    }

    /// The pending token for a range, or `None` if the range is drained.
    pub fn token(&self, range_id: &str) -> Option<&str> {
        self.tokens.get(range_id).map(String::as_str)
    }

    /// Records the token to resume a range from.
    pub fn set(&mut self, range_id: &str, token: &str) {
        self.tokens.insert(range_id.to_string(), token.to_string());
    }

    /// Marks a range as fully drained.
    pub fn mark_drained(&mut self, range_id: &str) {
        self.tokens.remove(range_id);
    }

    /// Returns true when every range has been drained.
    pub fn is_exhausted(&self) -> bool {
        self.tokens.is_empty()
    }
}
