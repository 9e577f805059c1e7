//! Engine error types

use thiserror::Error;

use crate::merge::MergeError;
use crate::transport::TransportError;

/// Result type for engine operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Anything that can abort a query execution.
///
/// The caller gets either a complete merged result for the given budget or
/// one of these; never a silently incomplete result.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A wire call failed; the status code and body survive intact
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A fetched row violated the shape its plan promised
    #[error(transparent)]
    Merge(#[from] MergeError),
}
