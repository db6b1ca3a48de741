//! Error types for record construction.
//!
//! Construction is the only fallible boundary in the crate: once a record
//! exists, every pipeline operation on it is total.

use thiserror::Error;

/// Result type for record operations
pub type RecordResult<T> = Result<T, RecordError>;

/// Errors raised when building a record from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The input was not a JSON object
    #[error("record must be a JSON object, found {found}")]
    NotAnObject {
        /// Type name of the rejected value
        found: &'static str,
    },

    /// A field held a null, array, or object value
    #[error("field '{field}' must hold a primitive value, found {found}")]
    NonPrimitiveField {
        /// Name of the offending field
        field: String,
        /// Type name of the rejected value
        found: &'static str,
    },
}
