//! Generated foreman unit codes.

use super::ForemanUnitDomainError;
use crate::division::domain::DivisionCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix shared by every foreman unit code.
const CODE_PREFIX: char = 'K';

/// Minimum number of digits in the rendered sequence.
const SEQUENCE_WIDTH: usize = 3;

/// One-based position of a foreman unit within its division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitSequence(u64);

impl UnitSequence {
    /// Sequence assigned to the first unit of a division.
    pub const FIRST: Self = Self(1);

    /// Sequence for a new unit when `count` units already exist.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitDomainError::SequenceExhausted`] on overflow.
    pub const fn after_count(count: u64) -> Result<Self, ForemanUnitDomainError> {
        match count.checked_add(1) {
            Some(value) => Ok(Self(value)),
            None => Err(ForemanUnitDomainError::SequenceExhausted),
        }
    }

    /// Returns the following sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitDomainError::SequenceExhausted`] on overflow.
    pub const fn next(self) -> Result<Self, ForemanUnitDomainError> {
        Self::after_count(self.0)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UnitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = SEQUENCE_WIDTH)
    }
}

/// Registry-generated foreman unit code, e.g. `K1-001`.
///
/// Built from the owning division's code and the unit's sequence within
/// that division. Sequences beyond 999 keep all their digits (`K1-1000`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForemanUnitCode(String);

impl ForemanUnitCode {
    /// Derives the code for `sequence` within the division `division`.
    #[must_use]
    pub fn derive(division: &DivisionCode, sequence: UnitSequence) -> Self {
        Self(format!("{CODE_PREFIX}{division}-{sequence}"))
    }

    /// Parses a previously generated code.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitDomainError::MalformedCode`] when the value does
    /// not have the `K<division>-<digits>` shape.
    pub fn parse(value: impl Into<String>) -> Result<Self, ForemanUnitDomainError> {
        let raw = value.into();
        let well_formed = raw
            .strip_prefix(CODE_PREFIX)
            .and_then(|rest| rest.rsplit_once('-'))
            .is_some_and(|(division, digits)| {
                !division.is_empty()
                    && digits.len() >= SEQUENCE_WIDTH
                    && digits.chars().all(|c| c.is_ascii_digit())
            });

        if well_formed {
            Ok(Self(raw))
        } else {
            Err(ForemanUnitDomainError::MalformedCode(raw))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ForemanUnitCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ForemanUnitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
