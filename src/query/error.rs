//! Query error types
//!
//! Grammar mismatch is the only failure a query surfaces to its caller.
//! Unparsable date literals inside an otherwise well-formed query degrade
//! gracefully (never-matching filter, unbounded range) and are logged, not
//! raised.

use thiserror::Error;

/// Errors that can occur during query operations
#[derive(Error, Debug)]
pub enum QueryError {
    /// The query string does not match the supported grammar
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
