//! In-memory task ledger.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::foreman_unit::domain::ForemanUnitId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskLedger, TaskLedgerError, TaskLedgerResult},
};

/// Thread-safe in-memory task ledger.
///
/// Does not verify that referenced foreman units exist, and nothing stops a
/// unit from being deleted while a task for it is being recorded. Callers
/// that need that guarantee check before recording and serialize the two;
/// [`RegistryApi`](crate::registry::RegistryApi) does both.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskLedger {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskLedgerError {
    TaskLedgerError::persistence(std::io::Error::other(err.to_string()))
}

fn as_count(count: usize) -> u64 {
    u64::try_from(count).unwrap_or(u64::MAX)
}

#[async_trait]
impl TaskLedger for InMemoryTaskLedger {
    async fn record(&self, task: &Task) -> TaskLedgerResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskLedgerError::DuplicateTask(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn remove(&self, id: TaskId) -> TaskLedgerResult<()> {
        let mut tasks = self.tasks.write().map_err(lock_error)?;
        tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskLedgerError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskLedgerResult<Option<Task>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(tasks.get(&id).cloned())
    }

    async fn count_by_foreman_unit(&self, foreman_unit_id: ForemanUnitId) -> TaskLedgerResult<u64> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        Ok(as_count(
            tasks
                .values()
                .filter(|task| task.foreman_unit_id() == foreman_unit_id)
                .count(),
        ))
    }

    async fn counts_for_units(
        &self,
        foreman_unit_ids: &[ForemanUnitId],
    ) -> TaskLedgerResult<HashMap<ForemanUnitId, u64>> {
        let tasks = self.tasks.read().map_err(lock_error)?;
        let mut counts: HashMap<ForemanUnitId, u64> =
            foreman_unit_ids.iter().map(|id| (*id, 0)).collect();
        for task in tasks.values() {
            if let Some(count) = counts.get_mut(&task.foreman_unit_id()) {
                *count += 1;
            }
        }
        Ok(counts)
    }
}
