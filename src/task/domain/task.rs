//! Ledger task record.

use super::{TaskDomainError, TaskId};
use crate::foreman_unit::domain::ForemanUnitId;
use crate::text::non_blank;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum length for a task title, matching the `VARCHAR(255)` column.
const MAX_TITLE_LENGTH: usize = 255;

/// Work item attached to a foreman unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    foreman_unit_id: ForemanUnitId,
    title: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning foreman unit.
    pub foreman_unit_id: ForemanUnitId,
    /// Persisted title.
    pub title: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task for `foreman_unit_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title or
    /// [`TaskDomainError::TitleTooLong`] past 255 characters.
    pub fn new(
        foreman_unit_id: ForemanUnitId,
        title: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let validated = non_blank(title).ok_or(TaskDomainError::EmptyTitle)?;
        if validated.chars().count() > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong(MAX_TITLE_LENGTH));
        }
        Ok(Self {
            id: TaskId::new(),
            foreman_unit_id,
            title: validated,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            foreman_unit_id: data.foreman_unit_id,
            title: data.title,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning foreman unit.
    #[must_use]
    pub const fn foreman_unit_id(&self) -> ForemanUnitId {
        self.foreman_unit_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
