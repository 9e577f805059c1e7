//! Order-preserving merge
//!
//! Every item must carry the rewritten `{orderByItems, payload}` shape.
//! The combined sequence is stably sorted by comparing `orderByItems`
//! term by term under the plan's per-term directions; ties fall through to
//! the next term, and items with no ordering difference keep their relative
//! concatenation order.

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::{array_field, compare_values};
use crate::plan::{QueryPlan, SortOrder};

use super::distinct::reduce_distinct;
use super::errors::{MergeError, MergeResult};
use super::ORDER_BY_ITEMS;

/// Merges two partial sequences under the plan's ORDER BY terms.
pub fn merge_order_by(
    plan: &QueryPlan,
    mut accumulated: Vec<Value>,
    incoming: Vec<Value>,
) -> MergeResult<Vec<Value>> {
    accumulated.extend(incoming);

    // Validate the wrapper shape up front; the sort comparator cannot fail
    for row in &accumulated {
        array_field(row, ORDER_BY_ITEMS)
            .map_err(|_| MergeError::MissingWrapper(ORDER_BY_ITEMS))?;
    }

    // Vec::sort_by is stable: equal-key items keep concatenation order
    accumulated.sort_by(|a, b| compare_rows(a, b, &plan.order_by));

    if plan.is_distinct() {
        return reduce_distinct(plan, accumulated);
    }
    Ok(accumulated)
}

fn compare_rows(a: &Value, b: &Value, directions: &[SortOrder]) -> Ordering {
    // Shape was validated before sorting
    let empty = Vec::new();
    let a_items = array_field(a, ORDER_BY_ITEMS).unwrap_or(&empty);
    let b_items = array_field(b, ORDER_BY_ITEMS).unwrap_or(&empty);

    for (index, direction) in directions.iter().enumerate() {
        let ordering = compare_values(a_items.get(index), b_items.get(index));
        let ordering = match direction {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DistinctType;
    use serde_json::json;

    fn row(keys: Vec<Value>, payload: Value) -> Value {
        json!({ "orderByItems": keys, "payload": payload })
    }

    fn payloads(rows: &[Value]) -> Vec<Value> {
        rows.iter().map(|r| r["payload"].clone()).collect()
    }

    #[test]
    fn test_descending_numeric_merge() {
        let plan = QueryPlan::passthrough().with_order_by(SortOrder::Descending);
        let left = vec![
            row(vec![json!(5)], json!(5)),
            row(vec![json!(3)], json!(3)),
            row(vec![json!(1)], json!(1)),
        ];
        let right = vec![row(vec![json!(4)], json!(4)), row(vec![json!(2)], json!(2))];

        let merged = merge_order_by(&plan, left, right).unwrap();

        assert_eq!(
            payloads(&merged),
            vec![json!(5), json!(4), json!(3), json!(2), json!(1)]
        );
    }

    #[test]
    fn test_ties_fall_through_to_next_term() {
        let plan = QueryPlan::passthrough()
            .with_order_by(SortOrder::Ascending)
            .with_order_by(SortOrder::Descending);
        let left = vec![row(vec![json!("a"), json!(1)], json!("a1"))];
        let right = vec![
            row(vec![json!("a"), json!(9)], json!("a9")),
            row(vec![json!("b"), json!(5)], json!("b5")),
        ];

        let merged = merge_order_by(&plan, left, right).unwrap();

        assert_eq!(
            payloads(&merged),
            vec![json!("a9"), json!("a1"), json!("b5")]
        );
    }

    #[test]
    fn test_stability_on_equal_keys() {
        let plan = QueryPlan::passthrough().with_order_by(SortOrder::Ascending);
        let left = vec![
            row(vec![json!(1)], json!("first")),
            row(vec![json!(1)], json!("second")),
        ];
        let right = vec![row(vec![json!(1)], json!("third"))];

        let merged = merge_order_by(&plan, left, right).unwrap();

        assert_eq!(
            payloads(&merged),
            vec![json!("first"), json!("second"), json!("third")]
        );
    }

    #[test]
    fn test_merging_sorted_inputs_stays_sorted() {
        let plan = QueryPlan::passthrough().with_order_by(SortOrder::Ascending);
        let left = vec![
            row(vec![json!(1)], json!(1)),
            row(vec![json!(4)], json!(4)),
            row(vec![json!(7)], json!(7)),
        ];
        let right = vec![
            row(vec![json!(2)], json!(2)),
            row(vec![json!(6)], json!(6)),
        ];

        let merged = merge_order_by(&plan, left, right).unwrap();

        assert_eq!(
            payloads(&merged),
            vec![json!(1), json!(2), json!(4), json!(6), json!(7)]
        );
    }

    #[test]
    fn test_distinct_applied_after_sort() {
        let plan = QueryPlan::passthrough()
            .with_order_by(SortOrder::Ascending)
            .with_distinct(DistinctType::Ordered)
            .with_rewritten_query("SELECT ...");
        let left = vec![
            row(vec![json!(2)], json!({"c": 2})),
            row(vec![json!(1)], json!({"c": 1})),
        ];
        let right = vec![row(vec![json!(2)], json!({"c": 2}))];

        let merged = merge_order_by(&plan, left, right).unwrap();

        assert_eq!(payloads(&merged), vec![json!({"c": 1}), json!({"c": 2})]);
    }

    #[test]
    fn test_missing_wrapper_fails_loudly() {
        let plan = QueryPlan::passthrough().with_order_by(SortOrder::Ascending);
        let result = merge_order_by(&plan, vec![json!({"c": 1})], vec![]);

        assert_eq!(
            result.unwrap_err(),
            MergeError::MissingWrapper(ORDER_BY_ITEMS)
        );
    }
}
