//! Repository port for division persistence.

use crate::division::domain::{Division, DivisionCode, DivisionId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for division repository operations.
pub type DivisionRepositoryResult<T> = Result<T, DivisionRepositoryError>;

/// Division persistence contract.
#[async_trait]
pub trait DivisionRepository: Send + Sync {
    /// Stores a new division.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionRepositoryError::DuplicateCode`] when another
    /// division already uses the code, or
    /// [`DivisionRepositoryError::DuplicateDivision`] when the identifier is
    /// taken.
    async fn insert(&self, division: &Division) -> DivisionRepositoryResult<()>;

    /// Finds a division by identifier.
    async fn find_by_id(&self, id: DivisionId) -> DivisionRepositoryResult<Option<Division>>;

    /// Finds a division by its unique code.
    async fn find_by_code(&self, code: &DivisionCode)
    -> DivisionRepositoryResult<Option<Division>>;

    /// Returns every division, most recently created first.
    async fn list_all(&self) -> DivisionRepositoryResult<Vec<Division>>;
}

/// Errors returned by division repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DivisionRepositoryError {
    /// A division with the same identifier already exists.
    #[error("duplicate division identifier: {0}")]
    DuplicateDivision(DivisionId),

    /// A division with the same code already exists.
    #[error("division code '{0}' is already in use")]
    DuplicateCode(DivisionCode),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DivisionRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
