//! Listing filter for foreman units.

use crate::division::domain::DivisionId;

/// Selection criteria for listing foreman units.
///
/// The default lists active units across all divisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForemanUnitFilter {
    division_id: Option<DivisionId>,
    active_only: bool,
}

impl Default for ForemanUnitFilter {
    fn default() -> Self {
        Self {
            division_id: None,
            active_only: true,
        }
    }
}

impl ForemanUnitFilter {
    /// Creates the default filter: active units in every division.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the listing to one division.
    #[must_use]
    pub const fn in_division(mut self, division_id: DivisionId) -> Self {
        self.division_id = Some(division_id);
        self
    }

    /// Includes deactivated units.
    #[must_use]
    pub const fn including_inactive(mut self) -> Self {
        self.active_only = false;
        self
    }

    /// Returns the division restriction, if any.
    #[must_use]
    pub const fn division_id(&self) -> Option<DivisionId> {
        self.division_id
    }

    /// Returns `true` when deactivated units are excluded.
    #[must_use]
    pub const fn active_only(&self) -> bool {
        self.active_only
    }
}
