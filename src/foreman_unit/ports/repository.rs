//! Repository port for foreman unit persistence.

use crate::division::domain::{Division, DivisionId};
use crate::foreman_unit::domain::{
    ForemanUnit, ForemanUnitChanges, ForemanUnitCode, ForemanUnitDomainError, ForemanUnitFilter,
    ForemanUnitId, NewForemanUnit,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for foreman unit repository operations.
pub type ForemanUnitRepositoryResult<T> = Result<T, ForemanUnitRepositoryError>;

/// Foreman unit persistence contract.
#[async_trait]
pub trait ForemanUnitRepository: Send + Sync {
    /// Assigns the next code in `division` to `draft` and stores it.
    ///
    /// Counting the division's units, choosing the code, and inserting the
    /// row form one atomic unit with respect to other insertions into the
    /// same division. The sequence starts at `count + 1` and advances past
    /// any code that is already taken.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRepositoryError::DivisionNotFound`] when the
    /// division vanished before the insert, or
    /// [`ForemanUnitRepositoryError::DuplicateCode`] if the store's unique
    /// guard still rejects the chosen code.
    async fn insert_next_in_division(
        &self,
        division: &Division,
        draft: NewForemanUnit,
    ) -> ForemanUnitRepositoryResult<ForemanUnit>;

    /// Applies `changes` to the stored unit and returns the result.
    ///
    /// Reading the current row, applying the changeset, and writing it back
    /// are atomic with respect to other updates of the same unit. The stored
    /// code is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRepositoryError::NotFound`] when the unit does
    /// not exist, or [`ForemanUnitRepositoryError::DivisionNotFound`] when
    /// the changeset moves it to a division the store does not hold.
    async fn apply_changes(
        &self,
        id: ForemanUnitId,
        changes: &ForemanUnitChanges,
    ) -> ForemanUnitRepositoryResult<ForemanUnit>;

    /// Deletes a unit and frees its code.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRepositoryError::NotFound`] when the unit does
    /// not exist, or [`ForemanUnitRepositoryError::StillReferenced`] when the
    /// store refuses because tasks still point at it.
    async fn remove(&self, id: ForemanUnitId) -> ForemanUnitRepositoryResult<()>;

    /// Finds a unit by identifier.
    async fn find_by_id(&self, id: ForemanUnitId)
    -> ForemanUnitRepositoryResult<Option<ForemanUnit>>;

    /// Finds a unit by generated code.
    async fn find_by_code(
        &self,
        code: &ForemanUnitCode,
    ) -> ForemanUnitRepositoryResult<Option<ForemanUnit>>;

    /// Returns the units matching `filter`, most recently created first.
    async fn list(&self, filter: &ForemanUnitFilter)
    -> ForemanUnitRepositoryResult<Vec<ForemanUnit>>;

    /// Counts the units currently owned by `division_id`, active or not.
    async fn count_in_division(&self, division_id: DivisionId) -> ForemanUnitRepositoryResult<u64>;
}

/// Errors returned by foreman unit repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ForemanUnitRepositoryError {
    /// A unit with the same identifier already exists.
    #[error("duplicate foreman unit identifier: {0}")]
    DuplicateUnit(ForemanUnitId),

    /// The generated code collided with an existing unit.
    #[error("foreman unit code '{0}' is already in use")]
    DuplicateCode(ForemanUnitCode),

    /// The owning division does not exist.
    #[error("division not found: {0}")]
    DivisionNotFound(DivisionId),

    /// The unit was not found.
    #[error("foreman unit not found: {0}")]
    NotFound(ForemanUnitId),

    /// The store refused to delete a unit that tasks still reference.
    #[error("foreman unit {0} is still referenced by tasks")]
    StillReferenced(ForemanUnitId),

    /// Code generation could not produce a sequence.
    #[error(transparent)]
    Sequence(#[from] ForemanUnitDomainError),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ForemanUnitRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
