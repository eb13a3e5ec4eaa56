//! Service layer for division creation and lookup.

use crate::division::{
    domain::{Division, DivisionCode, DivisionDomainError, DivisionId},
    ports::{DivisionRepository, DivisionRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDivisionRequest {
    code: String,
    name: String,
    description: Option<String>,
}

impl CreateDivisionRequest {
    /// Creates a request with the required code and name.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
        }
    }

    /// Sets the division description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for division directory operations.
#[derive(Debug, Error)]
pub enum DivisionDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DivisionDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DivisionRepositoryError),
}

/// Result type for division directory operations.
pub type DivisionDirectoryResult<T> = Result<T, DivisionDirectoryError>;

/// Division directory orchestration service.
#[derive(Clone)]
pub struct DivisionDirectoryService<D, C>
where
    D: DivisionRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<D>,
    clock: Arc<C>,
}

impl<D, C> DivisionDirectoryService<D, C>
where
    D: DivisionRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new division directory service.
    #[must_use]
    pub const fn new(repository: Arc<D>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a division.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionDirectoryError::Domain`] when the code or name is
    /// empty, or [`DivisionDirectoryError::Repository`] wrapping
    /// [`DivisionRepositoryError::DuplicateCode`] when the code is taken.
    pub async fn create(&self, request: CreateDivisionRequest) -> DivisionDirectoryResult<Division> {
        let CreateDivisionRequest {
            code,
            name,
            description,
        } = request;

        let division_code = DivisionCode::new(code)?;
        let division = Division::new(division_code, name, description, &*self.clock)?;
        self.repository.insert(&division).await?;

        tracing::info!(
            division_id = %division.id(),
            code = %division.code(),
            "division created"
        );
        Ok(division)
    }

    /// Returns every division, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionDirectoryError::Repository`] when persistence
    /// lookup fails.
    pub async fn list_all(&self) -> DivisionDirectoryResult<Vec<Division>> {
        let divisions = self.repository.list_all().await?;
        tracing::debug!(count = divisions.len(), "listed divisions");
        Ok(divisions)
    }

    /// Finds a division by code.
    ///
    /// A code that could never be valid resolves to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionDirectoryError::Repository`] when persistence
    /// lookup fails.
    pub async fn get_by_code(&self, code: &str) -> DivisionDirectoryResult<Option<Division>> {
        let Ok(division_code) = DivisionCode::new(code) else {
            return Ok(None);
        };
        Ok(self.repository.find_by_code(&division_code).await?)
    }

    /// Finds a division by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionDirectoryError::Repository`] when persistence
    /// lookup fails.
    pub async fn get_by_id(&self, id: DivisionId) -> DivisionDirectoryResult<Option<Division>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
