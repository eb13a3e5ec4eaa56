//! Request payloads for foreman unit creation and update.

use crate::division::domain::DivisionId;

/// Request payload for creating a foreman unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateForemanUnitRequest {
    pub(super) division_id: DivisionId,
    pub(super) name: String,
    pub(super) foreman_name: Option<String>,
    pub(super) description: Option<String>,
}

impl CreateForemanUnitRequest {
    /// Creates a request for a vacant unit under `division_id`.
    #[must_use]
    pub fn new(division_id: DivisionId, name: impl Into<String>) -> Self {
        Self {
            division_id,
            name: name.into(),
            foreman_name: None,
            description: None,
        }
    }

    /// Names the foreman. Blank input leaves the unit vacant.
    #[must_use]
    pub fn with_foreman(mut self, foreman_name: impl Into<String>) -> Self {
        self.foreman_name = Some(foreman_name.into());
        self
    }

    /// Sets the unit description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a foreman unit.
///
/// Only the fields that were set change. Setting the foreman to an empty
/// string or calling [`vacate`](Self::vacate) makes the unit vacant, which
/// is different from leaving the foreman untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateForemanUnitRequest {
    pub(super) name: Option<String>,
    pub(super) foreman_name: Option<Option<String>>,
    pub(super) division_id: Option<DivisionId>,
    pub(super) description: Option<Option<String>>,
    pub(super) active: Option<bool>,
}

impl UpdateForemanUnitRequest {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renames the unit.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Assigns a foreman. Blank input vacates the unit.
    #[must_use]
    pub fn assign_foreman(mut self, foreman_name: impl Into<String>) -> Self {
        self.foreman_name = Some(Some(foreman_name.into()));
        self
    }

    /// Removes the foreman, leaving the unit vacant.
    #[must_use]
    pub fn vacate(mut self) -> Self {
        self.foreman_name = Some(None);
        self
    }

    /// Moves the unit to another division. Its code does not change.
    #[must_use]
    pub const fn with_division(mut self, division_id: DivisionId) -> Self {
        self.division_id = Some(division_id);
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Activates or deactivates the unit.
    #[must_use]
    pub const fn with_active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.foreman_name.is_none()
            && self.division_id.is_none()
            && self.description.is_none()
            && self.active.is_none()
    }
}
