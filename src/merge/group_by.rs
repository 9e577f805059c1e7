//! Group-key aggregate combination
//!
//! Every item must carry the rewritten `{groupByItems, payload}` shape.
//! Rows whose `groupByItems` tuples are deep-equal are combined alias by
//! alias under the plan's declared aggregate kinds; unmatched rows carry
//! through unchanged.
//!
//! The merge is associative and commutative across any grouping of partial
//! inputs, which is what makes incremental merging, partition by partition
//! and page by page, correct. AVERAGE in particular stays a `(sum, count)`
//! pair here; division is deferred to finalization so rounding error never
//! compounds.

use serde_json::{json, Value};

use crate::document::{array_field, compare_values, number_field, object_field};
use crate::plan::{AggregateKind, QueryPlan};

use super::errors::{MergeError, MergeResult};
use super::{GROUP_BY_ITEMS, PAYLOAD};

/// Folds `incoming` group rows into `accumulated`, combining matched keys.
pub fn merge_group_by(
    plan: &QueryPlan,
    accumulated: Vec<Value>,
    incoming: Vec<Value>,
) -> MergeResult<Vec<Value>> {
    let mut merged = accumulated;

    'next_row: for row in incoming {
        let keys = array_field(&row, GROUP_BY_ITEMS)
            .map_err(|_| MergeError::MissingWrapper(GROUP_BY_ITEMS))?
            .clone();
        object_field(&row, PAYLOAD).map_err(|_| MergeError::MissingWrapper(PAYLOAD))?;

        for existing in merged.iter_mut() {
            let existing_keys = array_field(existing, GROUP_BY_ITEMS)
                .map_err(|_| MergeError::MissingWrapper(GROUP_BY_ITEMS))?;
            if *existing_keys == keys {
                combine_payloads(plan, existing, &row)?;
                continue 'next_row;
            }
        }

        merged.push(row);
    }

    Ok(merged)
}

/// Combines the aggregates of two rows that share a group key tuple.
fn combine_payloads(plan: &QueryPlan, existing: &mut Value, incoming: &Value) -> MergeResult<()> {
    let incoming_payload = object_field(incoming, PAYLOAD)
        .map_err(|_| MergeError::MissingWrapper(PAYLOAD))?
        .clone();
    let existing_payload = existing
        .get_mut(PAYLOAD)
        .and_then(Value::as_object_mut)
        .ok_or(MergeError::MissingWrapper(PAYLOAD))?;

    for (alias, kind) in &plan.group_by_alias_to_aggregate {
        let incoming_value = match incoming_payload.get(alias) {
            Some(value) => value,
            // Alias absent on this side; the other side's partial stands
            None => continue,
        };
        let combined = match existing_payload.get(alias) {
            Some(current) => combine_one(alias, *kind, current, incoming_value)?,
            None => incoming_value.clone(),
        };
        existing_payload.insert(alias.clone(), combined);
    }

    Ok(())
}

fn combine_one(
    alias: &str,
    kind: AggregateKind,
    current: &Value,
    incoming: &Value,
) -> MergeResult<Value> {
    match kind {
        AggregateKind::Count | AggregateKind::Sum => {
            add_numbers(alias, kind.as_str(), current, incoming)
        }
        AggregateKind::Min => {
            if compare_values(Some(incoming), Some(current)) == std::cmp::Ordering::Less {
                Ok(incoming.clone())
            } else {
                Ok(current.clone())
            }
        }
        AggregateKind::Max => {
            if compare_values(Some(incoming), Some(current)) == std::cmp::Ordering::Greater {
                Ok(incoming.clone())
            } else {
                Ok(current.clone())
            }
        }
        AggregateKind::Average => {
            let sum = pair_component(alias, current, "sum")? + pair_component(alias, incoming, "sum")?;
            let count =
                pair_component(alias, current, "count")? + pair_component(alias, incoming, "count")?;
            Ok(json!({ "sum": sum, "count": count }))
        }
    }
}

/// Adds two partial numeric aggregates, staying integral when both sides are.
fn add_numbers(alias: &str, kind: &'static str, a: &Value, b: &Value) -> MergeResult<Value> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Ok(json!(x + y));
    }
    let x = a.as_f64().ok_or_else(|| bad_aggregate(alias, kind, a))?;
    let y = b.as_f64().ok_or_else(|| bad_aggregate(alias, kind, b))?;
    Ok(json!(x + y))
}

/// Reads one component of an AVERAGE `(sum, count)` pair.
fn pair_component(alias: &str, pair: &Value, component: &str) -> MergeResult<f64> {
    number_field(pair, component).map_err(|_| bad_aggregate(alias, "AVERAGE", pair))
}

fn bad_aggregate(alias: &str, kind: &'static str, found: &Value) -> MergeError {
    MergeError::BadAggregate {
        alias: alias.to_string(),
        kind,
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plan() -> QueryPlan {
        QueryPlan::passthrough()
            .with_rewritten_query("SELECT ...")
            .with_aggregate("n", AggregateKind::Count)
            .with_aggregate("total", AggregateKind::Sum)
            .with_aggregate("low", AggregateKind::Min)
            .with_aggregate("high", AggregateKind::Max)
            .with_aggregate("mean", AggregateKind::Average)
    }

    fn row(key: &str, n: i64, total: f64, low: i64, high: i64, sum: f64, count: f64) -> Value {
        json!({
            "groupByItems": [key],
            "payload": {
                "n": n,
                "total": total,
                "low": low,
                "high": high,
                "mean": {"sum": sum, "count": count}
            }
        })
    }

    #[test]
    fn test_matched_keys_combine() {
        let merged = merge_group_by(
            &plan(),
            vec![row("a", 2, 10.0, 3, 9, 10.0, 2.0)],
            vec![row("a", 3, 5.0, 1, 7, 5.0, 3.0)],
        )
        .unwrap();

        assert_eq!(merged.len(), 1);
        let payload = &merged[0]["payload"];
        assert_eq!(payload["n"], json!(5));
        assert_eq!(payload["total"], json!(15.0));
        assert_eq!(payload["low"], json!(1));
        assert_eq!(payload["high"], json!(9));
        assert_eq!(payload["mean"], json!({"sum": 15.0, "count": 5.0}));
    }

    #[test]
    fn test_unmatched_keys_carry_through() {
        let merged = merge_group_by(
            &plan(),
            vec![row("a", 1, 1.0, 1, 1, 1.0, 1.0)],
            vec![row("b", 2, 2.0, 2, 2, 2.0, 1.0)],
        )
        .unwrap();

        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_group_keys_compare_deeply() {
        let p = QueryPlan::passthrough()
            .with_rewritten_query("SELECT ...")
            .with_aggregate("n", AggregateKind::Count);
        let left = vec![json!({
            "groupByItems": [{"city": "porto", "zip": "4000"}],
            "payload": {"n": 1}
        })];
        // Same key object, different key order in the source text
        let right_key: Value =
            serde_json::from_str(r#"{"zip": "4000", "city": "porto"}"#).unwrap();
        let right = vec![json!({
            "groupByItems": [right_key],
            "payload": {"n": 4}
        })];

        let merged = merge_group_by(&p, left, right).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0]["payload"]["n"], json!(5));
    }

    #[test]
    fn test_associativity_and_commutativity() {
        let a = vec![row("a", 1, 10.0, 5, 5, 10.0, 1.0)];
        let b = vec![row("a", 2, 20.0, 2, 8, 20.0, 2.0)];
        let c = vec![
            row("a", 3, 30.0, 7, 9, 30.0, 3.0),
            row("b", 1, 1.0, 1, 1, 1.0, 1.0),
        ];
        let p = plan();

        let left_assoc = merge_group_by(
            &p,
            merge_group_by(&p, a.clone(), b.clone()).unwrap(),
            c.clone(),
        )
        .unwrap();
        let right_assoc =
            merge_group_by(&p, a.clone(), merge_group_by(&p, b.clone(), c.clone()).unwrap())
                .unwrap();
        let from_empty = merge_group_by(
            &p,
            merge_group_by(&p, merge_group_by(&p, Vec::new(), a).unwrap(), b).unwrap(),
            c,
        )
        .unwrap();

        for merged in [&left_assoc, &right_assoc, &from_empty] {
            let a_row = merged
                .iter()
                .find(|r| r["groupByItems"] == json!(["a"]))
                .unwrap();
            assert_eq!(a_row["payload"]["n"], json!(6));
            assert_eq!(a_row["payload"]["total"], json!(60.0));
            assert_eq!(a_row["payload"]["low"], json!(2));
            assert_eq!(a_row["payload"]["high"], json!(9));
            assert_eq!(a_row["payload"]["mean"], json!({"sum": 60.0, "count": 6.0}));
        }
    }

    #[test]
    fn test_missing_group_key_wrapper_fails() {
        let result = merge_group_by(&plan(), vec![], vec![json!({"payload": {"n": 1}})]);
        assert_eq!(
            result.unwrap_err(),
            MergeError::MissingWrapper(GROUP_BY_ITEMS)
        );
    }

    #[test]
    fn test_missing_payload_wrapper_fails() {
        let result = merge_group_by(&plan(), vec![], vec![json!({"groupByItems": ["a"]})]);
        assert_eq!(result.unwrap_err(), MergeError::MissingWrapper(PAYLOAD));
    }

    #[test]
    fn test_uncombinable_sum_fails() {
        let p = QueryPlan::passthrough()
            .with_rewritten_query("SELECT ...")
            .with_aggregate("total", AggregateKind::Sum);
        let left = vec![json!({"groupByItems": ["a"], "payload": {"total": 1}})];
        let right = vec![json!({"groupByItems": ["a"], "payload": {"total": "oops"}})];

        let result = merge_group_by(&p, left, right);

        assert!(matches!(
            result.unwrap_err(),
            MergeError::BadAggregate { .. }
        ));
    }
}
