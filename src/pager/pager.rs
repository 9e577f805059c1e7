//! Page fetch loop for one scope
//!
//! Fetch flow (strict order):
//! 1. Execute one page fetch with the last-seen continuation token
//! 2. Accumulate items and request charge
//! 3. Stop on an empty continuation token (scope drained)
//! 4. Stop once the caller's item budget is met, if one was given
//!
//! The plan's OFFSET/LIMIT are never applied here; only the caller's
//! max-item-count bounds the fetch. On error the whole partial result for
//! the scope, including its accrued charge, is discarded.

use serde_json::Value;

use crate::observability::Logger;
use crate::transport::{QueryParameter, QueryScope, Transport, TransportResult};

/// Internal page size used when the caller wants an unbounded fetch, to keep
/// single wire responses moderate.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Everything one scope produced before its budget or its data ran out
#[derive(Debug, Clone, Default)]
pub struct RangeResult {
    /// Concatenation of all fetched pages, in server order
    pub items: Vec<Value>,
    /// Total request charge across the fetched pages
    pub request_charge: f64,
    /// Continuation token after the last fetched page; empty when the scope
    /// has no more data
    pub continuation: String,
}

impl RangeResult {
    /// Returns true if the scope has been fully drained
    pub fn is_drained(&self) -> bool {
        self.continuation.is_empty()
    }
}

/// Pager over a single query scope
pub struct PartitionPager<'a, T: Transport> {
    transport: &'a T,
    database: &'a str,
    collection: &'a str,
}

impl<'a, T: Transport> PartitionPager<'a, T> {
    /// Creates a pager for one collection
    pub fn new(transport: &'a T, database: &'a str, collection: &'a str) -> Self {
        Self {
            transport,
            database,
            collection,
        }
    }

    /// Fetches pages from `scope` starting at `continuation` until the scope
    /// is drained or `max_item_count` items have accumulated.
    ///
    /// A `max_item_count` of zero or negative means "fetch everything".
    pub fn drain(
        &self,
        query: &str,
        parameters: &[QueryParameter],
        scope: &QueryScope,
        continuation: &str,
        max_item_count: i32,
    ) -> TransportResult<RangeResult> {
        let page_size = if max_item_count > 0 {
            max_item_count as usize
        } else {
            DEFAULT_PAGE_SIZE
        };

        let mut items: Vec<Value> = Vec::new();
        let mut request_charge = 0.0;
        let mut token = continuation.to_string();

        loop {
            let page = self.transport.fetch_query_page(
                self.database,
                self.collection,
                query,
                parameters,
                scope,
                &token,
                page_size,
            )?;

            request_charge += page.request_charge;
            token = page.continuation.clone();

            Logger::trace(
                "PAGE_FETCHED",
                &[
                    ("scope", scope.as_str().to_string()),
                    ("items", page.count().to_string()),
                    ("last", page.is_last().to_string()),
                ],
            );

            items.extend(page.items);

            if token.is_empty() {
                break;
            }
            if max_item_count > 0 && items.len() >= max_item_count as usize {
                break;
            }
        }

        Ok(RangeResult {
            items,
            request_charge,
            continuation: token,
        })
    }
}
