//! Opaque session tokens and per-request context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque session token presented by a caller.
///
/// The registry never inspects the token; it only hands it to a
/// [`SessionResolver`](crate::identity::ports::SessionResolver).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials; keep them out of logs.
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Transport-neutral context for a single registry request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    session: Option<SessionToken>,
}

impl RequestContext {
    /// Creates a context with no session attached.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { session: None }
    }

    /// Creates a context carrying the given session token.
    #[must_use]
    pub const fn with_session(token: SessionToken) -> Self {
        Self {
            session: Some(token),
        }
    }

    /// Returns the session token, if one was presented.
    #[must_use]
    pub const fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }
}
