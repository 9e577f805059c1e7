//! Plan predicates
//!
//! Boolean predicates that gate every downstream decision in the engine.
//! They read immutable plan fields, so they stay constant for the duration of
//! one query execution. No side effects, no error conditions.

use super::types::QueryPlan;

/// Placeholder the gateway leaves in rewritten ORDER BY query text; it must
/// be substituted before the query is executable.
const ORDER_BY_FILTER_PLACEHOLDER: &str = "{lagoon-formattable-orderby-filter}";

impl QueryPlan {
    /// True unless the DISTINCT shape is `None`
    pub fn is_distinct(&self) -> bool {
        self.distinct_type != super::DistinctType::None
    }

    /// True iff the alias-to-aggregate mapping is non-empty
    pub fn is_group_by(&self) -> bool {
        !self.group_by_alias_to_aggregate.is_empty()
    }

    /// True iff at least one ORDER BY direction is present
    pub fn is_order_by(&self) -> bool {
        !self.order_by.is_empty()
    }

    /// True iff the gateway asked the client to execute an alternate query
    pub fn is_rewritten(&self) -> bool {
        !self.rewritten_query.is_empty()
    }

    /// The query text to put on the wire: the rewritten text with its filter
    /// placeholder substituted, or the original when no rewrite happened.
    pub fn effective_query(&self, original: &str) -> String {
        if self.is_rewritten() {
            self.rewritten_query
                .replace(ORDER_BY_FILTER_PLACEHOLDER, "true")
        } else {
            original.to_string()
        }
    }
}
