//! Cross-partition query coordination
//!
//! The engine owns the end-to-end flow of one logical query: fetch the plan,
//! list the partition key ranges, drain each range through the pager, fold
//! partial results through the plan-selected merge strategy, and finalize.
//! Pagination across calls is carried by an explicit continuation state the
//! caller threads through; the engine itself holds no query state.

mod coordinator;
mod errors;
mod query;
mod result;
mod state;

pub use coordinator::QueryEngine;
pub use errors::{QueryError, QueryResult};
pub use query::Query;
pub use result::MergedResult;
pub use state::ContinuationState;
