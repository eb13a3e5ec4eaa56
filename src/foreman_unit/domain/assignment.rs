//! Foreman assignment and vacancy.

use super::ForemanUnitDomainError;
use crate::text::non_blank;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a foreman name, matching the `VARCHAR(255)` column.
const MAX_FOREMAN_NAME_LENGTH: usize = 255;

/// Name of the foreman assigned to a unit. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForemanName(String);

impl ForemanName {
    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ForemanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a foreman unit currently has a foreman.
///
/// Derived solely from the presence of a foreman name. Both states are
/// valid; a vacant unit is expected, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "foreman_name", rename_all = "snake_case")]
pub enum Assignment {
    /// No foreman is assigned.
    #[default]
    Vacant,
    /// The named foreman runs the unit.
    Assigned(ForemanName),
}

impl Assignment {
    /// Builds an assignment from raw input.
    ///
    /// `None`, an empty string, and whitespace-only input all mean vacancy;
    /// anything else is trimmed and becomes the assigned foreman.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitDomainError::TooLong`] when the name exceeds 255
    /// characters.
    pub fn from_input(value: Option<String>) -> Result<Self, ForemanUnitDomainError> {
        match value.and_then(non_blank) {
            None => Ok(Self::Vacant),
            Some(name) if name.chars().count() > MAX_FOREMAN_NAME_LENGTH => {
                Err(ForemanUnitDomainError::TooLong {
                    field: "foreman name",
                    max: MAX_FOREMAN_NAME_LENGTH,
                })
            }
            Some(name) => Ok(Self::Assigned(ForemanName(name))),
        }
    }

    /// Returns `true` when no foreman is assigned.
    #[must_use]
    pub const fn is_vacant(&self) -> bool {
        matches!(self, Self::Vacant)
    }

    /// Returns the assigned foreman, if any.
    #[must_use]
    pub const fn foreman_name(&self) -> Option<&ForemanName> {
        match self {
            Self::Vacant => None,
            Self::Assigned(name) => Some(name),
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vacant => f.write_str("vacant"),
            Self::Assigned(name) => write!(f, "assigned to {name}"),
        }
    }
}
