//! Query plan wire types
//!
//! Field names follow the gateway's camelCase JSON; builder constructors
//! exist so tests and transports can assemble plans directly.

use std::collections::BTreeMap;

use serde::Deserialize;

/// DISTINCT shape declared by the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DistinctType {
    /// Not a DISTINCT query
    #[default]
    None,
    /// DISTINCT over a query whose results arrive in sorted order
    Ordered,
    /// DISTINCT over unsorted results
    Unordered,
}

/// Direction of one ORDER BY term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// Aggregate behind one grouped alias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum AggregateKind {
    Count,
    Sum,
    Min,
    Max,
    Average,
}

impl AggregateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateKind::Count => "COUNT",
            AggregateKind::Sum => "SUM",
            AggregateKind::Min => "MIN",
            AggregateKind::Max => "MAX",
            AggregateKind::Average => "AVERAGE",
        }
    }
}

/// Immutable query plan, one per logical query submission.
///
/// If `rewritten_query` is non-empty, every result row until finalization has
/// the wrapped shape `{ "orderByItems"?: [...], "groupByItems"?: [...],
/// "payload": <original-projection> }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryPlan {
    /// DISTINCT shape
    pub distinct_type: DistinctType,
    /// TOP n clause
    pub top: Option<u64>,
    /// OFFSET clause
    pub offset: Option<u64>,
    /// LIMIT clause
    pub limit: Option<u64>,
    /// One direction per ORDER BY term, in term order
    pub order_by: Vec<SortOrder>,
    /// Projected alias to aggregate kind, empty unless GROUP BY
    pub group_by_alias_to_aggregate: BTreeMap<String, AggregateKind>,
    /// Alternate query text to execute instead of the original; empty if the
    /// query executes as-is
    pub rewritten_query: String,
    /// True when the projection is a bare `SELECT VALUE`
    pub has_select_value: bool,
}

impl QueryPlan {
    /// Creates the trivial plan: execute as-is, no merge work needed
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// Sets the DISTINCT shape
    pub fn with_distinct(mut self, distinct_type: DistinctType) -> Self {
        self.distinct_type = distinct_type;
        self
    }

    /// Appends one ORDER BY term direction
    pub fn with_order_by(mut self, order: SortOrder) -> Self {
        self.order_by.push(order);
        self
    }

    /// Declares the aggregate behind a grouped alias
    pub fn with_aggregate(mut self, alias: impl Into<String>, kind: AggregateKind) -> Self {
        self.group_by_alias_to_aggregate.insert(alias.into(), kind);
        self
    }

    /// Sets the rewritten query text
    pub fn with_rewritten_query(mut self, query: impl Into<String>) -> Self {
        self.rewritten_query = query.into();
        self
    }

    /// Sets the OFFSET clause
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the LIMIT clause
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the TOP clause
    pub fn with_top(mut self, top: u64) -> Self {
        self.top = Some(top);
        self
    }

    /// Marks the projection as `SELECT VALUE`
    pub fn with_select_value(mut self) -> Self {
        self.has_select_value = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plan_from_wire() {
        let plan: QueryPlan = serde_json::from_value(json!({
            "distinctType": "Unordered",
            "offset": 2,
            "limit": 10,
            "orderBy": ["Descending"],
            "groupByAliasToAggregate": {"total": "Sum"},
            "rewrittenQuery": "SELECT ...",
            "hasSelectValue": false
        }))
        .unwrap();

        assert_eq!(plan.distinct_type, DistinctType::Unordered);
        assert_eq!(plan.offset, Some(2));
        assert_eq!(plan.limit, Some(10));
        assert_eq!(plan.order_by, vec![SortOrder::Descending]);
        assert_eq!(
            plan.group_by_alias_to_aggregate.get("total"),
            Some(&AggregateKind::Sum)
        );
        assert_eq!(plan.rewritten_query, "SELECT ...");
    }

    #[test]
    fn test_missing_fields_default() {
        let plan: QueryPlan = serde_json::from_value(json!({})).unwrap();

        assert_eq!(plan.distinct_type, DistinctType::None);
        assert!(plan.order_by.is_empty());
        assert!(plan.group_by_alias_to_aggregate.is_empty());
        assert!(plan.rewritten_query.is_empty());
        assert_eq!(plan.top, None);
    }

    #[test]
    fn test_builder() {
        let plan = QueryPlan::passthrough()
            .with_order_by(SortOrder::Ascending)
            .with_order_by(SortOrder::Descending)
            .with_rewritten_query("SELECT c.a FROM c")
            .with_limit(5);

        assert_eq!(plan.order_by.len(), 2);
        assert_eq!(plan.limit, Some(5));
        assert!(!plan.rewritten_query.is_empty());
    }
}
