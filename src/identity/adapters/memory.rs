//! In-memory session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::identity::{
    domain::{Principal, SessionToken},
    ports::{SessionLookupError, SessionResolver},
};

/// Thread-safe in-memory session store.
///
/// Issues random opaque tokens bound to principals. Suitable for tests and
/// for embedding the registry behind a transport that manages its own
/// authentication.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Principal>>>,
}

impl InMemorySessionStore {
    /// Creates an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new session token for `principal`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionLookupError`] when the store lock is poisoned.
    pub fn issue(&self, principal: Principal) -> Result<SessionToken, SessionLookupError> {
        let token = SessionToken::new(Uuid::new_v4().simple().to_string());
        let mut sessions = self
            .sessions
            .write()
            .map_err(|err| SessionLookupError::backend(std::io::Error::other(err.to_string())))?;
        sessions.insert(token.clone(), principal);
        Ok(token)
    }

    /// Revokes a session token. Returns `true` when the token was known.
    ///
    /// # Errors
    ///
    /// Returns [`SessionLookupError`] when the store lock is poisoned.
    pub fn revoke(&self, token: &SessionToken) -> Result<bool, SessionLookupError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|err| SessionLookupError::backend(std::io::Error::other(err.to_string())))?;
        Ok(sessions.remove(token).is_some())
    }
}

#[async_trait]
impl SessionResolver for InMemorySessionStore {
    async fn resolve(&self, token: &SessionToken) -> Result<Option<Principal>, SessionLookupError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|err| SessionLookupError::backend(std::io::Error::other(err.to_string())))?;
        Ok(sessions.get(token).copied())
    }
}
