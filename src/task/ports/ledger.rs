//! Ledger port consumed by the foreman unit registry.

use crate::foreman_unit::domain::ForemanUnitId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task ledger operations.
pub type TaskLedgerResult<T> = Result<T, TaskLedgerError>;

/// Task persistence contract.
///
/// The registry depends only on [`TaskLedger::count_by_foreman_unit`] and
/// [`TaskLedger::counts_for_units`]; the remaining operations exist so
/// tasks can be recorded and cleared at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskLedger: Send + Sync {
    /// Records a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError::DuplicateTask`] when the identifier is
    /// taken, or [`TaskLedgerError::ForemanUnitNotFound`] when the store
    /// enforces the unit reference and it does not resolve.
    async fn record(&self, task: &Task) -> TaskLedgerResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError::NotFound`] when the task does not exist.
    async fn remove(&self, id: TaskId) -> TaskLedgerResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskLedgerResult<Option<Task>>;

    /// Counts the tasks referencing `foreman_unit_id`.
    async fn count_by_foreman_unit(&self, foreman_unit_id: ForemanUnitId) -> TaskLedgerResult<u64>;

    /// Counts tasks for several units at once. Units without tasks map to
    /// zero.
    async fn counts_for_units(
        &self,
        foreman_unit_ids: &[ForemanUnitId],
    ) -> TaskLedgerResult<HashMap<ForemanUnitId, u64>>;
}

/// Errors returned by task ledger implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskLedgerError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The referenced foreman unit does not exist.
    #[error("foreman unit not found: {0}")]
    ForemanUnitNotFound(ForemanUnitId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskLedgerError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
