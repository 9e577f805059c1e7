//! Wire types shared between the engine and the transport

use serde::Deserialize;
use serde_json::Value;

/// One server-owned shard of a collection, identified by a hash-space
/// interval. The bounds are opaque: the engine uses them only to tell ranges
/// apart and never parses them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionKeyRange {
    /// Range id, stable within a collection's lifetime
    pub id: String,
    /// Inclusive lower hash bound
    pub min_inclusive: String,
    /// Exclusive upper hash bound
    pub max_exclusive: String,
}

impl PartitionKeyRange {
    /// Creates a partition key range
    pub fn new(
        id: impl Into<String>,
        min_inclusive: impl Into<String>,
        max_exclusive: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            min_inclusive: min_inclusive.into(),
            max_exclusive: max_exclusive.into(),
        }
    }
}

/// Scope a page fetch is restricted to
#[derive(Debug, Clone, PartialEq)]
pub enum QueryScope {
    /// No restriction; the transport enables cross-partition execution
    CrossPartition,
    /// One explicit partition key range id
    PartitionRange(String),
    /// One explicit logical-partition key value
    PartitionKey(Value),
}

impl QueryScope {
    /// Returns the scope name for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryScope::CrossPartition => "cross_partition",
            QueryScope::PartitionRange(_) => "partition_range",
            QueryScope::PartitionKey(_) => "partition_key",
        }
    }

    /// Returns true if the scope pins a single range or logical partition
    pub fn is_pinned(&self) -> bool {
        !matches!(self, QueryScope::CrossPartition)
    }
}

/// A named query parameter bound into a placeholder in the query text
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParameter {
    /// Placeholder name, e.g. `@maxPrice`
    pub name: String,
    /// Bound value
    pub value: Value,
}

impl QueryParameter {
    /// Creates a query parameter
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Outcome of one page fetch
#[derive(Debug, Clone, Default)]
pub struct ResultPage {
    /// Documents or scalar values returned by this page, in server order.
    /// When the plan rewrote the query these are the wrapped rows
    /// (`orderByItems` / `groupByItems` / `payload`), not the caller shape.
    pub items: Vec<Value>,
    /// Request charge consumed by this page, additive across pages
    pub request_charge: f64,
    /// Continuation token for the next page; empty when the scope is drained
    pub continuation: String,
}

impl ResultPage {
    /// Creates a result page
    pub fn new(items: Vec<Value>, request_charge: f64, continuation: impl Into<String>) -> Self {
        Self {
            items,
            request_charge,
            continuation: continuation.into(),
        }
    }

    /// Number of items in this page
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns true if this was the last page for its scope
    pub fn is_last(&self) -> bool {
        self.continuation.is_empty()
    }
}
