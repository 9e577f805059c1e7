//! Gateway query plan
//!
//! For non-trivial queries the gateway returns a plan describing how the
//! client must execute them: whether the query text was rewritten, whether it
//! carries DISTINCT / GROUP BY / ORDER BY / OFFSET-LIMIT clauses, and the
//! aggregate kind behind each grouped alias. The plan is consumed as an
//! opaque, immutable input; malformed plan data is the transport's concern.

mod analyzer;
mod types;

pub use types::{AggregateKind, DistinctType, QueryPlan, SortOrder};
