//! Single-partition pager
//!
//! Drives one partition key range (or one explicit logical partition) through
//! repeated page fetches until the caller's item budget is satisfied or the
//! gateway signals end-of-results with an empty continuation token.

mod pager;

pub use pager::{PartitionPager, RangeResult, DEFAULT_PAGE_SIZE};
