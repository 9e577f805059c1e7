//! Shared fixture gateway for integration tests
//!
//! A canned transport: a fixed plan, a fixed range catalog, and pages keyed
//! by (range id, continuation token). Pages are replayable, so one fixture
//! can serve repeated engine calls over the same data.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use lagoondb_query::plan::QueryPlan;
use lagoondb_query::transport::{
    PartitionKeyRange, QueryParameter, QueryScope, ResultPage, Transport, TransportResult,
};

pub struct FixtureGateway {
    plan: QueryPlan,
    ranges: Vec<PartitionKeyRange>,
    pages: HashMap<(String, String), ResultPage>,
    fetches: RefCell<usize>,
}

impl FixtureGateway {
    pub fn new(plan: QueryPlan, range_ids: &[&str]) -> Self {
        Self {
            plan,
            ranges: range_ids
                .iter()
                .map(|id| PartitionKeyRange::new(*id, "", "FF"))
                .collect(),
            pages: HashMap::new(),
            fetches: RefCell::new(0),
        }
    }

    /// Scripts one page: fetching `range` at `token` yields `items` and the
    /// `next` continuation token.
    pub fn with_page(
        mut self,
        range: &str,
        token: &str,
        items: Vec<Value>,
        charge: f64,
        next: &str,
    ) -> Self {
        self.pages.insert(
            (range.to_string(), token.to_string()),
            ResultPage::new(items, charge, next),
        );
        self
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.borrow()
    }
}

impl Transport for FixtureGateway {
    fn fetch_partition_ranges(
        &self,
        _database: &str,
        _collection: &str,
    ) -> TransportResult<Vec<PartitionKeyRange>> {
        Ok(self.ranges.clone())
    }

    fn fetch_query_plan(
        &self,
        _database: &str,
        _collection: &str,
        _query: &str,
        _parameters: &[QueryParameter],
    ) -> TransportResult<QueryPlan> {
        Ok(self.plan.clone())
    }

    fn fetch_query_page(
        &self,
        _database: &str,
        _collection: &str,
        _query: &str,
        _parameters: &[QueryParameter],
        scope: &QueryScope,
        continuation: &str,
        _page_size_hint: usize,
    ) -> TransportResult<ResultPage> {
        *self.fetches.borrow_mut() += 1;
        // Pinned partition keys script pages under the key's JSON text
        let scope_key = match scope {
            QueryScope::PartitionRange(id) => id.clone(),
            QueryScope::PartitionKey(key) => key.to_string(),
            QueryScope::CrossPartition => "*".to_string(),
        };
        Ok(self
            .pages
            .get(&(scope_key, continuation.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}
