//! Set-deduplicating merge
//!
//! Removes duplicates by document identity: the combined dual hash of the
//! canonical JSON form of the raw item, or of its `payload` sub-object when
//! the query was rewritten. The first occurrence in sequence order wins.

use std::collections::HashSet;

use serde_json::Value;

use crate::document::digest;
use crate::plan::QueryPlan;

use super::errors::{MergeError, MergeResult};
use super::PAYLOAD;

/// Drops every item whose identity has already been seen earlier in `rows`.
///
/// Idempotent: reducing an already-reduced sequence returns it unchanged.
pub fn reduce_distinct(plan: &QueryPlan, rows: Vec<Value>) -> MergeResult<Vec<Value>> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut reduced = Vec::with_capacity(rows.len());

    for row in rows {
        let identity = if plan.is_rewritten() {
            row.get(PAYLOAD)
                .ok_or(MergeError::MissingWrapper(PAYLOAD))?
        } else {
            &row
        };

        if seen.insert(digest(identity)) {
            reduced.push(row);
        }
    }

    Ok(reduced)
}
