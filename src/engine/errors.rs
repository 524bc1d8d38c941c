//! Engine error types
//!
//! The taxonomy is narrow. Absent keys and filters are defined results
//! (`None` / empty), not errors, and record-type mismatches cannot exist
//! past the trait bound. What remains is lock poisoning: a panic inside a
//! per-filter update leaves that filter's index unusable, and later calls
//! touching it fail locally instead of propagating the panic.

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A per-filter index lock was poisoned by a panic in an earlier update
    #[error("index for filter {filter:?} is poisoned")]
    IndexPoisoned { filter: String },
}
