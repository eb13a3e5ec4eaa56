//! `PostgreSQL` implementation of the task ledger.

use super::models::{NewTaskRow, TaskRow};
use crate::foreman_unit::domain::ForemanUnitId;
use crate::storage::{
    RegistryPgPool,
    postgres::{get_conn_with, run_blocking_with},
    schema::tasks,
};
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskLedger, TaskLedgerError, TaskLedgerResult},
};
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::HashMap;

/// `PostgreSQL`-backed task ledger.
#[derive(Debug, Clone)]
pub struct PostgresTaskLedger {
    pool: RegistryPgPool,
}

impl PostgresTaskLedger {
    /// Creates a new ledger from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskLedgerResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskLedgerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskLedgerError::persistence)?;
                f(&mut connection)
            },
            TaskLedgerError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskLedger for PostgresTaskLedger {
    async fn record(&self, task: &Task) -> TaskLedgerResult<()> {
        let task_id = task.id();
        let unit_id = task.foreman_unit_id();
        let row = NewTaskRow {
            id: task_id.into_inner(),
            foreman_unit_id: unit_id.into_inner(),
            title: task.title().to_owned(),
            created_at: task.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskLedgerError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TaskLedgerError::ForemanUnitNotFound(unit_id)
                    }
                    _ => TaskLedgerError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn remove(&self, id: TaskId) -> TaskLedgerResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskLedgerError::persistence)?;
            if deleted == 0 {
                return Err(TaskLedgerError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskLedgerResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskLedgerError::persistence)?;
            Ok(row.map(row_to_task))
        })
        .await
    }

    async fn count_by_foreman_unit(&self, foreman_unit_id: ForemanUnitId) -> TaskLedgerResult<u64> {
        self.run_blocking(move |connection| {
            let count: i64 = tasks::table
                .filter(tasks::foreman_unit_id.eq(foreman_unit_id.into_inner()))
                .count()
                .get_result(connection)
                .map_err(TaskLedgerError::persistence)?;
            u64::try_from(count).map_err(TaskLedgerError::invalid_persisted_data)
        })
        .await
    }

    async fn counts_for_units(
        &self,
        foreman_unit_ids: &[ForemanUnitId],
    ) -> TaskLedgerResult<HashMap<ForemanUnitId, u64>> {
        let requested = foreman_unit_ids.to_vec();
        self.run_blocking(move |connection| {
            let uuids: Vec<uuid::Uuid> = requested.iter().map(|id| id.into_inner()).collect();
            let grouped: Vec<(uuid::Uuid, i64)> = tasks::table
                .filter(tasks::foreman_unit_id.eq_any(&uuids))
                .group_by(tasks::foreman_unit_id)
                .select((tasks::foreman_unit_id, count_star()))
                .load(connection)
                .map_err(TaskLedgerError::persistence)?;
            tally_counts(&requested, grouped)
        })
        .await
    }
}

/// Merges grouped counts into a map covering every requested unit.
pub(crate) fn tally_counts(
    requested: &[ForemanUnitId],
    grouped: Vec<(uuid::Uuid, i64)>,
) -> TaskLedgerResult<HashMap<ForemanUnitId, u64>> {
    let mut counts: HashMap<ForemanUnitId, u64> = requested.iter().map(|id| (*id, 0)).collect();
    for (unit_uuid, count) in grouped {
        let value = u64::try_from(count).map_err(TaskLedgerError::invalid_persisted_data)?;
        counts.insert(ForemanUnitId::from_uuid(unit_uuid), value);
    }
    Ok(counts)
}

/// Rebuilds a [`Task`] from a stored row.
pub(crate) fn row_to_task(row: TaskRow) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        foreman_unit_id: ForemanUnitId::from_uuid(row.foreman_unit_id),
        title: row.title,
        created_at: row.created_at,
    })
}
