//! Session resolution port.

use crate::identity::domain::{Principal, SessionToken};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Resolves opaque session tokens into principals.
///
/// Implementations own the session format and storage. A token that is
/// unknown, expired, or revoked resolves to `Ok(None)`; `Err` is reserved
/// for lookups that could not be answered at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Looks up the principal bound to `token`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionLookupError`] when the session backend cannot be
    /// queried.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<Principal>, SessionLookupError>;
}

/// Failure to consult the session backend.
#[derive(Debug, Clone, Error)]
#[error("session lookup failed: {0}")]
pub struct SessionLookupError(pub Arc<dyn std::error::Error + Send + Sync>);

impl SessionLookupError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
