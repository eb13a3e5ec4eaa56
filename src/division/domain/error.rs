//! Error types for division domain validation.

use thiserror::Error;

/// Errors returned while constructing division domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DivisionDomainError {
    /// The division code is empty after trimming.
    #[error("division code must not be empty")]
    EmptyCode,

    /// The division code contains whitespace or control characters.
    #[error("division code '{0}' must not contain whitespace")]
    InvalidCode(String),

    /// The division code exceeds the storage limit.
    #[error("division code exceeds {max} character limit: {code}")]
    CodeTooLong {
        /// Offending code.
        code: String,
        /// Maximum accepted length.
        max: usize,
    },

    /// The division name is empty after trimming.
    #[error("division name must not be empty")]
    EmptyName,
}
