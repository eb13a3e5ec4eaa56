//! Identifier types for the foreman unit domain.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a foreman unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForemanUnitId(Uuid);

impl ForemanUnitId {
    /// Creates a new random foreman unit identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a foreman unit identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ForemanUnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Uuid> for ForemanUnitId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ForemanUnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
