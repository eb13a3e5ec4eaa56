//! Error types for foreman unit domain validation.

use thiserror::Error;

/// Errors returned while constructing or changing foreman unit values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ForemanUnitDomainError {
    /// The unit name is empty after trimming.
    #[error("foreman unit name must not be empty")]
    EmptyName,

    /// A name exceeds the storage limit.
    #[error("{field} exceeds {max} character limit")]
    TooLong {
        /// Field that was too long.
        field: &'static str,
        /// Maximum accepted length.
        max: usize,
    },

    /// A stored unit code does not have the `K<division>-<sequence>` shape.
    #[error("malformed foreman unit code: {0}")]
    MalformedCode(String),

    /// The per-division sequence cannot be advanced further.
    #[error("foreman unit sequence exhausted")]
    SequenceExhausted,
}
