//! Error types for principal parsing and authorization.

use super::Role;
use thiserror::Error;

/// Reasons a caller is refused by the mutation gateway.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// No principal could be resolved for the request.
    #[error("no authenticated principal for this request")]
    MissingPrincipal,

    /// The principal is authenticated but lacks the required role.
    #[error("role '{actual}' is not permitted; '{required}' is required")]
    InsufficientRole {
        /// Role the operation demands.
        required: Role,
        /// Role the caller holds.
        actual: Role,
    },
}

/// Error returned while parsing a role from its storage representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown principal role: {0}")]
pub struct ParseRoleError(pub String);
