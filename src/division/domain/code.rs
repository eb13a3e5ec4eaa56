//! Validated division code.

use super::DivisionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a division code, matching the `VARCHAR(20)` column.
const MAX_CODE_LENGTH: usize = 20;

/// Short caller-assigned division code such as `"1"` or `"3"`.
///
/// Foreman unit codes embed this value (`K3-001`), so it may not contain
/// whitespace and never changes after the division is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DivisionCode(String);

impl DivisionCode {
    /// Creates a validated division code.
    ///
    /// Surrounding whitespace is trimmed; case is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionDomainError::EmptyCode`] when nothing remains after
    /// trimming, [`DivisionDomainError::InvalidCode`] when the code contains
    /// inner whitespace or control characters, or
    /// [`DivisionDomainError::CodeTooLong`] past 20 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, DivisionDomainError> {
        let raw = value.into();
        let normalized = raw.trim();

        if normalized.is_empty() {
            return Err(DivisionDomainError::EmptyCode);
        }

        if normalized.chars().count() > MAX_CODE_LENGTH {
            return Err(DivisionDomainError::CodeTooLong {
                code: raw,
                max: MAX_CODE_LENGTH,
            });
        }

        if normalized
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(DivisionDomainError::InvalidCode(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DivisionCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for DivisionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
