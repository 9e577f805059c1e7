//! Engine observability
//!
//! Structured JSON logging only. Logging is read-only, synchronous, and has
//! no side effects on query execution; the engine carries no metrics layer.

mod logger;

pub use logger::{Logger, Severity};
