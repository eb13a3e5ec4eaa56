//! Foreman unit aggregate root.

use super::{Assignment, ForemanUnitCode, ForemanUnitDomainError, ForemanUnitId};
use crate::division::domain::DivisionId;
use crate::text::{non_blank, non_blank_opt};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum length for a unit name, matching the `VARCHAR(255)` column.
const MAX_NAME_LENGTH: usize = 255;

fn validated_name(name: impl Into<String>) -> Result<String, ForemanUnitDomainError> {
    let normalized = non_blank(name).ok_or(ForemanUnitDomainError::EmptyName)?;
    if normalized.chars().count() > MAX_NAME_LENGTH {
        return Err(ForemanUnitDomainError::TooLong {
            field: "foreman unit name",
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(normalized)
}

/// A foreman unit that has not yet been given its code.
///
/// Drafts are validated by the service and handed to the repository, which
/// assigns the code atomically with the insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewForemanUnit {
    id: ForemanUnitId,
    name: String,
    assignment: Assignment,
    division_id: DivisionId,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewForemanUnit {
    /// Validates the inputs for a new unit under `division_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitDomainError::EmptyName`] when the name is blank,
    /// or [`ForemanUnitDomainError::TooLong`] for oversized names.
    pub fn new(
        division_id: DivisionId,
        name: impl Into<String>,
        assignment: Assignment,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, ForemanUnitDomainError> {
        Ok(Self {
            id: ForemanUnitId::new(),
            name: validated_name(name)?,
            assignment,
            division_id,
            description: non_blank_opt(description),
            created_at: clock.utc(),
        })
    }

    /// Returns the identifier the unit will be stored under.
    #[must_use]
    pub const fn id(&self) -> ForemanUnitId {
        self.id
    }

    /// Returns the owning division.
    #[must_use]
    pub const fn division_id(&self) -> DivisionId {
        self.division_id
    }

    /// Completes the draft with its generated code. The unit starts active.
    #[must_use]
    pub fn into_unit(self, code: ForemanUnitCode) -> ForemanUnit {
        ForemanUnit {
            id: self.id,
            code,
            name: self.name,
            assignment: self.assignment,
            division_id: self.division_id,
            description: self.description,
            active: true,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Foreman unit aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForemanUnit {
    id: ForemanUnitId,
    code: ForemanUnitCode,
    name: String,
    assignment: Assignment,
    division_id: DivisionId,
    description: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted foreman unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedForemanUnitData {
    /// Persisted unit identifier.
    pub id: ForemanUnitId,
    /// Persisted generated code.
    pub code: ForemanUnitCode,
    /// Persisted display name.
    pub name: String,
    /// Persisted assignment.
    pub assignment: Assignment,
    /// Persisted owning division.
    pub division_id: DivisionId,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted soft-retirement flag.
    pub active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ForemanUnit {
    /// Reconstructs a unit from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedForemanUnitData) -> Self {
        Self {
            id: data.id,
            code: data.code,
            name: data.name,
            assignment: data.assignment,
            division_id: data.division_id,
            description: data.description,
            active: data.active,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the unit identifier.
    #[must_use]
    pub const fn id(&self) -> ForemanUnitId {
        self.id
    }

    /// Returns the generated code.
    #[must_use]
    pub const fn code(&self) -> &ForemanUnitCode {
        &self.code
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the foreman assignment.
    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns `true` when no foreman is assigned.
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        self.assignment.is_vacant()
    }

    /// Returns the owning division.
    #[must_use]
    pub const fn division_id(&self) -> DivisionId {
        self.division_id
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns `true` unless the unit has been deactivated.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies `changes`. Fields the changeset leaves unset keep their
    /// current value, and the code is never touched.
    pub fn apply(&mut self, changes: &ForemanUnitChanges) {
        if changes.is_empty() {
            return;
        }
        if let Some(new_name) = &changes.name {
            self.name.clone_from(new_name);
        }
        if let Some(assignment) = &changes.assignment {
            self.assignment.clone_from(assignment);
        }
        if let Some(division_id) = changes.division_id {
            self.division_id = division_id;
        }
        if let Some(description) = &changes.description {
            self.description.clone_from(description);
        }
        if let Some(flag) = changes.active {
            self.active = flag;
        }
        self.updated_at = changes.stamped_at;
    }
}

/// A validated partial update for one foreman unit.
///
/// Stores apply a changeset to the row as it stands under their own lock,
/// so concurrent updates touching different fields never undo each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForemanUnitChanges {
    name: Option<String>,
    assignment: Option<Assignment>,
    division_id: Option<DivisionId>,
    description: Option<Option<String>>,
    active: Option<bool>,
    stamped_at: DateTime<Utc>,
}

impl ForemanUnitChanges {
    /// Starts an empty changeset stamped with the clock's current time.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self {
            name: None,
            assignment: None,
            division_id: None,
            description: None,
            active: None,
            stamped_at: clock.utc(),
        }
    }

    /// Renames the unit.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitDomainError::EmptyName`] when the name is blank,
    /// or [`ForemanUnitDomainError::TooLong`] for oversized names.
    pub fn rename(mut self, name: impl Into<String>) -> Result<Self, ForemanUnitDomainError> {
        self.name = Some(validated_name(name)?);
        Ok(self)
    }

    /// Replaces the foreman assignment.
    #[must_use]
    pub fn reassign(mut self, assignment: Assignment) -> Self {
        self.assignment = Some(assignment);
        self
    }

    /// Moves the unit to another division. The code is kept.
    #[must_use]
    pub const fn repoint(mut self, division_id: DivisionId) -> Self {
        self.division_id = Some(division_id);
        self
    }

    /// Replaces the description; blank input clears it.
    #[must_use]
    pub fn describe(mut self, description: Option<String>) -> Self {
        self.description = Some(non_blank_opt(description));
        self
    }

    /// Sets the soft-retirement flag.
    #[must_use]
    pub const fn set_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Returns the target division when the unit is being moved.
    #[must_use]
    pub const fn division_id(&self) -> Option<DivisionId> {
        self.division_id
    }

    /// Returns `true` when applying the changeset would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.assignment.is_none()
            && self.division_id.is_none()
            && self.description.is_none()
            && self.active.is_none()
    }
}
