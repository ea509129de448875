//! Error types for the sift crate.

use thiserror::Error;

/// Errors that can occur when building or running a query.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The record type has no field with this name.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// A numeric aggregate met a value that is not a number.
    #[error("field '{field}' holds a {found} value, expected a number")]
    NonNumeric { field: String, found: &'static str },

    /// Invalid regular expression pattern in a criteria clause.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, QueryError>;
