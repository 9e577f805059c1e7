//! Finalization pipeline
//!
//! Runs once over the fully merged sequence, in a fixed order:
//!
//! 1. a final distinct / group-by reduction pass (idempotent over already
//!    reduced input, so re-running it is harmless);
//! 2. wrapper flattening: rewritten rows collapse to their `payload`;
//!    grouped rows project the declared aliases, dividing AVERAGE pairs now;
//! 3. OFFSET, LIMIT, then TOP truncation over the flattened sequence.
//!
//! OFFSET is a whole-query clause. When execution resumes from a
//! continuation token of a rewritten query the skip already happened on the
//! first call, so the resumed call treats it as consumed. The rule applies
//! whether or not the plan also carries a LIMIT: re-skipping on any resumed
//! call would drop rows that were merely beyond the first page.

use serde_json::{json, Value};

use crate::merge::{
    merge_group_by, reduce_distinct, MergeError, MergeResult, GROUP_BY_ITEMS, PAYLOAD,
};
use crate::plan::{AggregateKind, QueryPlan};

/// Turns the merged accumulator into the rows handed back to the caller.
///
/// `resumed` is true when execution picked up from a continuation token.
pub fn finalize(plan: &QueryPlan, rows: Vec<Value>, resumed: bool) -> MergeResult<Vec<Value>> {
    let mut rows = if plan.is_distinct() {
        reduce_distinct(plan, rows)?
    } else {
        rows
    };

    if plan.is_group_by() {
        rows = merge_group_by(plan, Vec::new(), rows)?;
        rows = project_groups(plan, rows)?;
    } else if plan.is_rewritten() {
        rows = unwrap_payloads(rows)?;
    }

    let skip = if resumed && plan.is_rewritten() {
        0
    } else {
        plan.offset.unwrap_or(0) as usize
    };
    let mut rows: Vec<Value> = rows.into_iter().skip(skip).collect();

    if let Some(limit) = plan.limit {
        rows.truncate(limit as usize);
    }
    if let Some(top) = plan.top {
        rows.truncate(top as usize);
    }

    Ok(rows)
}

/// Collapses rewritten `{.., payload}` rows to their payloads.
fn unwrap_payloads(rows: Vec<Value>) -> MergeResult<Vec<Value>> {
    rows.into_iter()
        .map(|row| {
            row.get(PAYLOAD)
                .cloned()
                .ok_or(MergeError::MissingWrapper(PAYLOAD))
        })
        .collect()
}

/// Projects grouped rows into their declared aliases.
///
/// AVERAGE pairs are divided here, after every partial has been combined.
/// A `SELECT VALUE` projection over a single aggregate yields the bare
/// aggregate value instead of a one-field object.
fn project_groups(plan: &QueryPlan, rows: Vec<Value>) -> MergeResult<Vec<Value>> {
    let bare_alias = if plan.has_select_value && plan.group_by_alias_to_aggregate.len() == 1 {
        plan.group_by_alias_to_aggregate.keys().next().cloned()
    } else {
        None
    };

    rows.into_iter()
        .map(|row| {
            let payload = row
                .get(PAYLOAD)
                .and_then(Value::as_object)
                .ok_or(MergeError::MissingWrapper(PAYLOAD))?;
            row.get(GROUP_BY_ITEMS)
                .and_then(Value::as_array)
                .ok_or(MergeError::MissingWrapper(GROUP_BY_ITEMS))?;

            let mut projected = serde_json::Map::with_capacity(payload.len());
            for (alias, value) in payload {
                let value = match plan.group_by_alias_to_aggregate.get(alias) {
                    Some(AggregateKind::Average) => divide_average(alias, value)?,
                    // Non-average aggregates and plain grouped columns pass
                    // through as combined
                    _ => value.clone(),
                };
                projected.insert(alias.clone(), value);
            }

            match &bare_alias {
                Some(alias) => Ok(projected.remove(alias).unwrap_or(Value::Null)),
                None => Ok(Value::Object(projected)),
            }
        })
        .collect()
}

fn divide_average(alias: &str, pair: &Value) -> MergeResult<Value> {
    let bad = || MergeError::BadAggregate {
        alias: alias.to_string(),
        kind: "AVERAGE",
        found: pair.to_string(),
    };
    let sum = pair.get("sum").and_then(Value::as_f64).ok_or_else(bad)?;
    let count = pair.get("count").and_then(Value::as_f64).ok_or_else(bad)?;
    if count == 0.0 {
        return Ok(json!(0));
    }
    Ok(json!(sum / count))
}
