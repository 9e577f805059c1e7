//! Merge error types
//!
//! Merge-time invariant violations are defensive bugs, not user errors: a
//! row missing the wrapper shape its plan promised, or an aggregate holding a
//! value its declared kind cannot combine. They fail loudly rather than
//! silently producing wrong aggregates.

use thiserror::Error;

/// Result type for merge operations
pub type MergeResult<T> = Result<T, MergeError>;

/// Invariant violations detected while merging partial results
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A rewritten-query row is missing one of its wrapper fields
    #[error("rewritten row is missing the '{0}' wrapper field")]
    MissingWrapper(&'static str),

    /// An aggregate value cannot be combined under its declared kind
    #[error("aggregate '{alias}' ({kind}) holds an uncombinable value: {found}")]
    BadAggregate {
        alias: String,
        kind: &'static str,
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_wrapper_display() {
        let err = MergeError::MissingWrapper("groupByItems");
        assert!(format!("{}", err).contains("groupByItems"));
    }

    #[test]
    fn test_bad_aggregate_display() {
        let err = MergeError::BadAggregate {
            alias: "total".into(),
            kind: "SUM",
            found: "\"abc\"".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("total"));
        assert!(display.contains("SUM"));
    }
}
