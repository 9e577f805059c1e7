//! Result finalization
//!
//! The last step before results leave the engine: wrapper flattening,
//! deferred aggregate division, and OFFSET/LIMIT/TOP truncation.

mod finalizer;

pub use finalizer::finalize;
