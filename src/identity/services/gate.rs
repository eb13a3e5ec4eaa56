//! Resolves the calling principal for a request.

use crate::identity::{
    domain::{Principal, RequestContext},
    ports::SessionResolver,
};
use std::sync::Arc;

/// Front door of every registry request.
///
/// Exposes only "current principal or none". A missing session, an unknown
/// token, and an unreachable session backend all collapse to `None`; callers
/// translate that into an unauthorized response.
#[derive(Clone)]
pub struct IdentityGate<S>
where
    S: SessionResolver,
{
    resolver: Arc<S>,
}

impl<S> IdentityGate<S>
where
    S: SessionResolver,
{
    /// Creates a gate backed by the given resolver.
    #[must_use]
    pub const fn new(resolver: Arc<S>) -> Self {
        Self { resolver }
    }

    /// Resolves the principal for `context`.
    pub async fn resolve_principal(&self, context: &RequestContext) -> Option<Principal> {
        let token = context.session()?;
        match self.resolver.resolve(token).await {
            Ok(principal) => principal,
            Err(err) => {
                tracing::warn!(error = %err, "session lookup failed; treating caller as anonymous");
                None
            }
        }
    }
}
