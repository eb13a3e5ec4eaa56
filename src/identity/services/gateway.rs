//! Role-based authorization applied before registry operations.

use crate::identity::domain::{AuthorizationError, Principal, Role};
use std::fmt;

/// Role an operation demands from its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredRole {
    /// Only administrators may proceed.
    Admin,
    /// Any authenticated principal may proceed.
    Any,
}

impl fmt::Display for RequiredRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// Checks `principal` against `required`.
///
/// Returns the principal on success so callers can thread it onward.
///
/// # Errors
///
/// Returns [`AuthorizationError::MissingPrincipal`] when no principal is
/// present, or [`AuthorizationError::InsufficientRole`] when an admin-only
/// operation is attempted by a non-admin.
pub fn authorize(
    principal: Option<&Principal>,
    required: RequiredRole,
) -> Result<&Principal, AuthorizationError> {
    let Some(caller) = principal else {
        return Err(AuthorizationError::MissingPrincipal);
    };
    match required {
        RequiredRole::Any => Ok(caller),
        RequiredRole::Admin if caller.is_admin() => Ok(caller),
        RequiredRole::Admin => Err(AuthorizationError::InsufficientRole {
            required: Role::Admin,
            actual: caller.role(),
        }),
    }
}
