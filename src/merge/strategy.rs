//! Strategy selection and dispatch

use serde_json::Value;

use crate::plan::QueryPlan;

use super::errors::MergeResult;
use super::{distinct, group_by, order_by};

/// How partial results fold into the accumulated result.
///
/// Selected once per query; the plan predicates are immutable, so the choice
/// never changes mid-execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Simple sequence append; no dedup, no reordering
    Concat,
    /// Stable sort by the rewritten rows' ORDER BY keys; deduplicates after
    /// sorting when the plan is also distinct
    OrderBy,
    /// First-occurrence dedup over document identity
    Distinct,
    /// Group-key matching and partial-aggregate combination
    GroupBy,
}

impl MergeStrategy {
    /// Picks the strategy for a plan.
    pub fn for_plan(plan: &QueryPlan) -> Self {
        if plan.is_order_by() {
            MergeStrategy::OrderBy
        } else if plan.is_group_by() {
            MergeStrategy::GroupBy
        } else if plan.is_distinct() {
            MergeStrategy::Distinct
        } else {
            MergeStrategy::Concat
        }
    }

    /// Returns the strategy name for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::Concat => "concat",
            MergeStrategy::OrderBy => "order_by",
            MergeStrategy::Distinct => "distinct",
            MergeStrategy::GroupBy => "group_by",
        }
    }

    /// Folds `incoming` into `accumulated`.
    pub fn merge(
        &self,
        plan: &QueryPlan,
        mut accumulated: Vec<Value>,
        incoming: Vec<Value>,
    ) -> MergeResult<Vec<Value>> {
        match self {
            MergeStrategy::Concat => {
                accumulated.extend(incoming);
                Ok(accumulated)
            }
            MergeStrategy::OrderBy => order_by::merge_order_by(plan, accumulated, incoming),
            MergeStrategy::Distinct => {
                accumulated.extend(incoming);
                distinct::reduce_distinct(plan, accumulated)
            }
            MergeStrategy::GroupBy => group_by::merge_group_by(plan, accumulated, incoming),
        }
    }
}
