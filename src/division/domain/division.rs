//! Division aggregate root.

use super::{DivisionCode, DivisionDomainError, DivisionId};
use crate::text::{non_blank, non_blank_opt};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Top-level organizational unit of the estate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    id: DivisionId,
    code: DivisionCode,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedDivisionData {
    /// Persisted division identifier.
    pub id: DivisionId,
    /// Persisted division code.
    pub code: DivisionCode,
    /// Persisted display name.
    pub name: String,
    /// Persisted free-text description.
    pub description: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Division {
    /// Creates a new division.
    ///
    /// The name is trimmed; a blank description is stored as absent.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionDomainError::EmptyName`] when the name is blank.
    pub fn new(
        code: DivisionCode,
        name: impl Into<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, DivisionDomainError> {
        let validated_name = non_blank(name).ok_or(DivisionDomainError::EmptyName)?;
        Ok(Self {
            id: DivisionId::new(),
            code,
            name: validated_name,
            description: non_blank_opt(description),
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a division from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedDivisionData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            name: data.name,
            description: data.description,
            created_at: data.created_at,
        }
    }

    /// Returns the division identifier.
    #[must_use]
    pub const fn id(&self) -> DivisionId {
        self.id
    }

    /// Returns the division code.
    #[must_use]
    pub const fn code(&self) -> &DivisionCode {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
