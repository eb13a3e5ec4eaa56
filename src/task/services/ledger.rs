//! Service layer for recording and clearing ledger tasks.

use crate::foreman_unit::domain::ForemanUnitId;
use crate::task::{
    domain::{Task, TaskDomainError, TaskId},
    ports::{TaskLedger, TaskLedgerError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task ledger operations.
#[derive(Debug, Error)]
pub enum TaskLedgerServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Ledger operation failed.
    #[error(transparent)]
    Ledger(#[from] TaskLedgerError),
}

/// Result type for task ledger service operations.
pub type TaskLedgerServiceResult<T> = Result<T, TaskLedgerServiceError>;

/// Task ledger orchestration service.
#[derive(Clone)]
pub struct TaskLedgerService<L, C>
where
    L: TaskLedger,
    C: Clock + Send + Sync,
{
    ledger: Arc<L>,
    clock: Arc<C>,
}

impl<L, C> TaskLedgerService<L, C>
where
    L: TaskLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new task ledger service.
    #[must_use]
    pub const fn new(ledger: Arc<L>, clock: Arc<C>) -> Self {
        Self { ledger, clock }
    }

    /// Records a task against a foreman unit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerServiceError::Domain`] for an invalid title or
    /// [`TaskLedgerServiceError::Ledger`] when the ledger rejects the task.
    pub async fn record(
        &self,
        foreman_unit_id: ForemanUnitId,
        title: impl Into<String> + Send,
    ) -> TaskLedgerServiceResult<Task> {
        let task = Task::new(foreman_unit_id, title, &*self.clock)?;
        self.ledger.record(&task).await?;
        tracing::info!(task_id = %task.id(), foreman_unit_id = %foreman_unit_id, "task recorded");
        Ok(task)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerServiceError::Ledger`] wrapping
    /// [`TaskLedgerError::NotFound`] when the task does not exist.
    pub async fn remove(&self, id: TaskId) -> TaskLedgerServiceResult<()> {
        self.ledger.remove(id).await?;
        tracing::info!(task_id = %id, "task removed");
        Ok(())
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerServiceError::Ledger`] when lookup fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLedgerServiceResult<Option<Task>> {
        Ok(self.ledger.find_by_id(id).await?)
    }

    /// Counts the tasks referencing a foreman unit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerServiceError::Ledger`] when counting fails.
    pub async fn count_for_unit(&self, foreman_unit_id: ForemanUnitId) -> TaskLedgerServiceResult<u64> {
        Ok(self.ledger.count_by_foreman_unit(foreman_unit_id).await?)
    }
}
