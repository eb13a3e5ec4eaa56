//! Error taxonomy reported by the registry API.

use crate::division::{
    domain::DivisionId, ports::DivisionRepositoryError, services::DivisionDirectoryError,
};
use crate::foreman_unit::{
    domain::ForemanUnitId, ports::ForemanUnitRepositoryError,
    services::ForemanUnitRegistryError,
};
use crate::identity::domain::AuthorizationError;
use crate::task::{domain::TaskId, ports::TaskLedgerError, services::TaskLedgerServiceError};
use std::sync::Arc;
use thiserror::Error;

/// Result type for registry API operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Transport-neutral classification of a [`RegistryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    /// The request was malformed or failed validation.
    BadRequest,
    /// No principal could be resolved.
    Unauthorized,
    /// The principal lacks the required role.
    Forbidden,
    /// A referenced record does not exist.
    NotFound,
    /// The request conflicts with stored state.
    Conflict,
    /// The store failed.
    Internal,
}

/// Every failure the registry API can report.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The caller is missing or lacks the required role.
    #[error("unauthorized: {0}")]
    Unauthorized(#[from] AuthorizationError),

    /// A supplied value failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The foreman unit does not exist.
    #[error("foreman unit not found: {0}")]
    NotFound(ForemanUnitId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced division does not exist.
    #[error("division not found: {0}")]
    DivisionNotFound(DivisionId),

    /// A code is already in use.
    #[error("code '{0}' is already in use")]
    DuplicateCode(String),

    /// Tasks still reference the foreman unit.
    #[error("foreman unit {id} cannot be deleted: {count} task(s) still reference it")]
    HasDependentTasks {
        /// The unit that could not be deleted.
        id: ForemanUnitId,
        /// Number of dependent tasks.
        count: u64,
    },

    /// The store failed. The underlying error is passed through unchanged.
    #[error("storage failure: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl RegistryError {
    /// Wraps a storage failure.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }

    /// Classifies the error for a transport layer.
    #[must_use]
    pub const fn status_class(&self) -> StatusClass {
        match self {
            Self::Unauthorized(AuthorizationError::MissingPrincipal) => StatusClass::Unauthorized,
            Self::Unauthorized(AuthorizationError::InsufficientRole { .. }) => {
                StatusClass::Forbidden
            }
            Self::InvalidInput(_) => StatusClass::BadRequest,
            Self::NotFound(_) | Self::TaskNotFound(_) | Self::DivisionNotFound(_) => {
                StatusClass::NotFound
            }
            Self::DuplicateCode(_) | Self::HasDependentTasks { .. } => StatusClass::Conflict,
            Self::Storage(_) => StatusClass::Internal,
        }
    }
}

impl From<DivisionRepositoryError> for RegistryError {
    fn from(err: DivisionRepositoryError) -> Self {
        match err {
            DivisionRepositoryError::DuplicateCode(code) => Self::DuplicateCode(code.to_string()),
            other => Self::storage(other),
        }
    }
}

impl From<DivisionDirectoryError> for RegistryError {
    fn from(err: DivisionDirectoryError) -> Self {
        match err {
            DivisionDirectoryError::Domain(domain) => Self::InvalidInput(domain.to_string()),
            DivisionDirectoryError::Repository(repository) => repository.into(),
        }
    }
}

impl From<ForemanUnitRepositoryError> for RegistryError {
    fn from(err: ForemanUnitRepositoryError) -> Self {
        match err {
            ForemanUnitRepositoryError::DuplicateCode(code) => Self::DuplicateCode(code.to_string()),
            ForemanUnitRepositoryError::NotFound(id) => Self::NotFound(id),
            ForemanUnitRepositoryError::DivisionNotFound(id) => Self::DivisionNotFound(id),
            other => Self::storage(other),
        }
    }
}

impl From<TaskLedgerError> for RegistryError {
    fn from(err: TaskLedgerError) -> Self {
        match err {
            TaskLedgerError::NotFound(id) => Self::TaskNotFound(id),
            TaskLedgerError::ForemanUnitNotFound(id) => Self::NotFound(id),
            other => Self::storage(other),
        }
    }
}

impl From<ForemanUnitRegistryError> for RegistryError {
    fn from(err: ForemanUnitRegistryError) -> Self {
        match err {
            ForemanUnitRegistryError::Domain(domain) => Self::InvalidInput(domain.to_string()),
            ForemanUnitRegistryError::DivisionNotFound(id) => Self::DivisionNotFound(id),
            ForemanUnitRegistryError::NotFound(id) => Self::NotFound(id),
            ForemanUnitRegistryError::HasDependentTasks { id, count } => {
                Self::HasDependentTasks { id, count }
            }
            ForemanUnitRegistryError::Repository(repository) => repository.into(),
            ForemanUnitRegistryError::Division(division) => division.into(),
            ForemanUnitRegistryError::Ledger(ledger) => ledger.into(),
        }
    }
}

impl From<TaskLedgerServiceError> for RegistryError {
    fn from(err: TaskLedgerServiceError) -> Self {
        match err {
            TaskLedgerServiceError::Domain(domain) => Self::InvalidInput(domain.to_string()),
            TaskLedgerServiceError::Ledger(ledger) => ledger.into(),
        }
    }
}
