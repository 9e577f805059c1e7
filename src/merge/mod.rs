//! Plan-driven merge strategies
//!
//! The gateway merges nothing across partition key ranges; these pure
//! functions do. A strategy is selected once per query from the plan's
//! predicates and applied every time a range's partial result folds into the
//! accumulated result: plain concatenation, order-preserving merge,
//! set-deduplication, or group-key aggregate combination.

mod distinct;
mod errors;
mod group_by;
mod order_by;
mod strategy;

pub use distinct::reduce_distinct;
pub use errors::{MergeError, MergeResult};
pub use group_by::merge_group_by;
pub use order_by::merge_order_by;
pub use strategy::MergeStrategy;

/// Wrapper field carrying a row's ORDER BY sort keys in rewritten results
pub const ORDER_BY_ITEMS: &str = "orderByItems";

/// Wrapper field carrying a row's group key tuple in rewritten results
pub const GROUP_BY_ITEMS: &str = "groupByItems";

/// Wrapper field carrying the original projection in rewritten results
pub const PAYLOAD: &str = "payload";
