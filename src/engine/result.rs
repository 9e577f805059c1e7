//! Merged result type

use serde_json::Value;

/// The finalized outcome of one engine call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedResult {
    /// Finalized rows, in merge order
    pub items: Vec<Value>,
    /// Number of rows in `items`
    pub count: usize,
    /// Total request charge across every page fetched for this call,
    /// additive and never double-counted
    pub request_charge: f64,
}

impl MergedResult {
    /// Creates a result, deriving the count from the items
    pub fn new(items: Vec<Value>, request_charge: f64) -> Self {
        let count = items.len();
        Self {
            items,
            count,
            request_charge,
        }
    }

    /// Returns true if the call produced no rows
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
