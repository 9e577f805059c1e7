//! Query execution coordinator
//!
//! Execution flow for one call (strict order):
//! 1. Fetch the query plan and select the merge strategy from it
//! 2. List the collection's partition key ranges
//! 3. Restore the continuation state, or seed it fresh from the catalog
//! 4. Drain pending ranges sequentially in catalog listing order, folding
//!    each range's output through the merge strategy
//! 5. Finalize and hand back the rows plus the re-encoded state
//!
//! Any error discards the accumulated merge result along with its charge;
//! the caller retries from its own last continuation token.

use crate::finalize::finalize;
use crate::merge::MergeStrategy;
use crate::observability::Logger;
use crate::pager::PartitionPager;
use crate::plan::QueryPlan;
use crate::transport::{QueryScope, Transport};

use super::errors::QueryResult;
use super::query::Query;
use super::result::MergedResult;
use super::state::ContinuationState;

/// Client-side executor for queries spanning partition key ranges
pub struct QueryEngine<'a, T: Transport> {
    transport: &'a T,
    database: &'a str,
    collection: &'a str,
}

impl<'a, T: Transport> QueryEngine<'a, T> {
    /// Creates an engine for one collection
    pub fn new(transport: &'a T, database: &'a str, collection: &'a str) -> Self {
        Self {
            transport,
            database,
            collection,
        }
    }

    /// Executes a query pinned to a single scope, fetching everything.
    ///
    /// With one scope there is nothing to interleave, but the plan still
    /// applies: rewritten rows get merged, reduced, and finalized exactly as
    /// on the cross-partition path.
    pub fn execute(&self, query: &Query, scope: &QueryScope) -> QueryResult<MergedResult> {
        let plan = self.analyze(query)?;
        let strategy = MergeStrategy::for_plan(&plan);
        let effective = plan.effective_query(&query.text);

        let pager = PartitionPager::new(self.transport, self.database, self.collection);
        let drained = pager.drain(&effective, &query.parameters, scope, "", 0)?;

        let merged = strategy.merge(&plan, Vec::new(), drained.items)?;
        let items = finalize(&plan, merged, false)?;

        let result = MergedResult::new(items, drained.request_charge);
        self.log_completed(&result, "");
        Ok(result)
    }

    /// Executes one bounded page of a cross-partition query.
    ///
    /// `max_item_count` caps how many items this call accumulates before it
    /// stops fetching; zero or negative means fetch everything. The returned
    /// string is the continuation token for the next call; empty means the
    /// query is complete. Pass the previous call's token (or "") as
    /// `continuation`; a token the engine cannot decode falls back to a fresh
    /// start over the current range catalog.
    ///
    /// With a bounded budget, GROUP BY, DISTINCT, and cross-partition ORDER
    /// BY queries can terminate before every range has contributed, so a
    /// single page of such a query is not a complete answer. Drain the token
    /// to exhaustion, or use [`execute_cross_partition_all`] for those
    /// shapes.
    ///
    /// [`execute_cross_partition_all`]: QueryEngine::execute_cross_partition_all
    pub fn execute_cross_partition(
        &self,
        query: &Query,
        max_item_count: i32,
        continuation: &str,
    ) -> QueryResult<(MergedResult, String)> {
        let plan = self.analyze(query)?;
        let strategy = MergeStrategy::for_plan(&plan);
        let effective = plan.effective_query(&query.text);

        let ranges = self
            .transport
            .fetch_partition_ranges(self.database, self.collection)?;
        let resumed = !continuation.is_empty();
        let mut state = match ContinuationState::decode(continuation) {
            Some(state) => state,
            None => {
                if resumed {
                    Logger::warn("TOKEN_DISCARDED", &[("token", continuation.to_string())]);
                }
                ContinuationState::seed(&ranges)
            }
        };
        // Ids from before a partition split would otherwise pend forever
        state.prune_to_catalog(&ranges);

        let pager = PartitionPager::new(self.transport, self.database, self.collection);
        let mut accumulated = Vec::new();
        let mut request_charge = 0.0;

        for range in &ranges {
            // Absent from the state means this range was drained earlier
            let token = match state.token(&range.id) {
                Some(token) => token.to_string(),
                None => continue,
            };
            if budget_met(&plan, max_item_count, accumulated.len()) {
                break;
            }

            let scope = QueryScope::PartitionRange(range.id.clone());
            let budget = remaining_budget(max_item_count, accumulated.len());
            let drained = pager.drain(&effective, &query.parameters, &scope, &token, budget)?;

            request_charge += drained.request_charge;
            Logger::trace(
                "RANGE_DRAINED",
                &[
                    ("range", range.id.clone()),
                    ("items", drained.items.len().to_string()),
                    ("drained", drained.is_drained().to_string()),
                ],
            );

            if drained.is_drained() {
                state.mark_drained(&range.id);
            } else {
                state.set(&range.id, &drained.continuation);
            }

            accumulated = strategy.merge(&plan, accumulated, drained.items)?;

            if limit_reached(&plan, accumulated.len()) {
                Logger::trace(
                    "EARLY_TERMINATION",
                    &[("reason", "limit".into()), ("range", range.id.clone())],
                );
                break;
            }
        }

        let items = finalize(&plan, accumulated, resumed)?;
        let encoded = state.encode();

        let result = MergedResult::new(items, request_charge);
        self.log_completed(&result, &encoded);
        Ok((result, encoded))
    }

    /// Executes a cross-partition query to completion, in memory.
    pub fn execute_cross_partition_all(&self, query: &Query) -> QueryResult<MergedResult> {
        let (result, _) = self.execute_cross_partition(query, 0, "")?;
        Ok(result)
    }

    fn analyze(&self, query: &Query) -> QueryResult<QueryPlan> {
        let plan = self.transport.fetch_query_plan(
            self.database,
            self.collection,
            &query.text,
            &query.parameters,
        )?;
        Logger::info(
            "QUERY_PLAN_ANALYZED",
            &[
                ("strategy", MergeStrategy::for_plan(&plan).as_str().into()),
                ("rewritten", plan.is_rewritten().to_string()),
            ],
        );
        Ok(plan)
    }

    fn log_completed(&self, result: &MergedResult, continuation: &str) {
        Logger::info(
            "QUERY_COMPLETED",
            &[
                ("count", result.count.to_string()),
                ("charge", format!("{:.2}", result.request_charge)),
                ("complete", continuation.is_empty().to_string()),
            ],
        );
    }
}

/// Whether the accumulated item count exhausts the caller's budget.
///
/// GROUP BY keeps draining at exactly the budget: later rows can still merge
/// into existing groups without growing the count past it.
fn budget_met(plan: &QueryPlan, max_item_count: i32, accumulated: usize) -> bool {
    if max_item_count <= 0 {
        return false;
    }
    if plan.is_group_by() {
        accumulated > max_item_count as usize
    } else {
        accumulated >= max_item_count as usize
    }
}

/// Item budget to give the next range drain. Zero means unbounded, so a
/// group-by call sitting exactly at its budget gets a minimal bound instead.
fn remaining_budget(max_item_count: i32, accumulated: usize) -> i32 {
    if max_item_count <= 0 {
        return 0;
    }
    let remaining = max_item_count as i64 - accumulated as i64;
    if remaining > 0 {
        remaining as i32
    } else {
        1
    }
}

/// LIMIT can stop range draining early only when rows pass through
/// unreduced: a distinct, grouped, or rewritten plan may still shrink or
/// reorder the accumulator, so every pending range must contribute first.
fn limit_reached(plan: &QueryPlan, accumulated: usize) -> bool {
    if plan.is_distinct() || plan.is_group_by() || plan.is_rewritten() {
        return false;
    }
    match plan.limit {
        Some(limit) => accumulated as u64 >= plan.offset.unwrap_or(0) + limit,
        None => false,
    }
}
