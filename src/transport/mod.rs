//! Gateway transport contracts
//!
//! The engine never builds HTTP requests itself. A `Transport` implementation
//! owns signing, retries, timeouts, and body parsing, and hands the engine a
//! uniform view of the three gateway operations it needs. Cancellation also
//! lives at this boundary: an issued call cannot be interrupted by the engine.

mod errors;
mod types;

pub use errors::{TransportError, TransportResult};
pub use types::{PartitionKeyRange, QueryParameter, QueryScope, ResultPage};

use crate::plan::QueryPlan;

/// Gateway operations consumed by the query engine.
///
/// All calls are synchronous and strictly sequential; the engine never issues
/// two wire calls concurrently.
pub trait Transport {
    /// Lists the collection's current partition key ranges, in the gateway's
    /// listing order. No caching: every call reflects the current split.
    fn fetch_partition_ranges(
        &self,
        database: &str,
        collection: &str,
    ) -> TransportResult<Vec<PartitionKeyRange>>;

    /// Asks the gateway for the query plan of a query.
    ///
    /// Parameters are name/value pairs bound into placeholders already
    /// present in `query`.
    fn fetch_query_plan(
        &self,
        database: &str,
        collection: &str,
        query: &str,
        parameters: &[QueryParameter],
    ) -> TransportResult<QueryPlan>;

    /// Fetches one page of query results within the given scope.
    ///
    /// An empty `continuation` means "start from the beginning"; the returned
    /// page carries the token for the next fetch (empty when the scope is
    /// exhausted). `page_size_hint` caps the page size on the wire.
    #[allow(clippy::too_many_arguments)]
    fn fetch_query_page(
        &self,
        database: &str,
        collection: &str,
        query: &str,
        parameters: &[QueryParameter],
        scope: &QueryScope,
        continuation: &str,
        page_size_hint: usize,
    ) -> TransportResult<ResultPage>;
}
