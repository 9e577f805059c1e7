//! lagoondb-query - client-side cross-partition query engine for LagoonDB
//!
//! LagoonDB collections are split into server-managed partition key ranges.
//! The gateway executes a query against one range at a time and does not
//! perform cross-partition ordering, deduplication, or aggregation itself.
//! This crate turns one logical query plus a gateway query plan into a
//! correctly ordered, deduplicated, aggregated, and windowed result set,
//! paging through per-range continuation tokens.

pub mod document;
pub mod engine;
pub mod finalize;
pub mod merge;
pub mod observability;
pub mod pager;
pub mod plan;
pub mod transport;
