//! Deletion against `PostgreSQL`, where foreign keys back the task count.

use crate::postgres::helpers::{
    CleanupGuard, insert_division, registry_over, setup_pool, test_runtime,
};
use async_trait::async_trait;
use estate_registry::division::adapters::postgres::PostgresDivisionRepository;
use estate_registry::foreman_unit::{
    adapters::postgres::PostgresForemanUnitRepository,
    domain::{ForemanUnitCode, ForemanUnitId},
    ports::{ForemanUnitRepository, ForemanUnitRepositoryError},
    services::{CreateForemanUnitRequest, ForemanUnitRegistryError, ForemanUnitRegistryService},
};
use estate_registry::task::{
    adapters::postgres::PostgresTaskLedger,
    domain::{Task, TaskId},
    ports::{TaskLedger, TaskLedgerError, TaskLedgerResult},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Ledger whose first per-unit count misses every task, as if the task
/// were recorded right after the count was taken.
struct LateTaskLedger {
    inner: PostgresTaskLedger,
    first_count_taken: AtomicBool,
}

#[async_trait]
impl TaskLedger for LateTaskLedger {
    async fn record(&self, task: &Task) -> TaskLedgerResult<()> {
        self.inner.record(task).await
    }

    async fn remove(&self, id: TaskId) -> TaskLedgerResult<()> {
        self.inner.remove(id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskLedgerResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn count_by_foreman_unit(&self, foreman_unit_id: ForemanUnitId) -> TaskLedgerResult<u64> {
        if self.first_count_taken.swap(true, Ordering::SeqCst) {
            self.inner.count_by_foreman_unit(foreman_unit_id).await
        } else {
            Ok(0)
        }
    }

    async fn counts_for_units(
        &self,
        foreman_unit_ids: &[ForemanUnitId],
    ) -> TaskLedgerResult<HashMap<ForemanUnitId, u64>> {
        self.inner.counts_for_units(foreman_unit_ids).await
    }
}

#[rstest]
fn foreign_key_refusal_reports_dependent_tasks(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_fk_refusal_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 2).expect("pool setup");
    let ledger = PostgresTaskLedger::new(pool.clone());
    let registry = ForemanUnitRegistryService::new(
        Arc::new(PostgresDivisionRepository::new(pool.clone())),
        Arc::new(PostgresForemanUnitRepository::new(pool.clone())),
        Arc::new(LateTaskLedger {
            inner: ledger.clone(),
            first_count_taken: AtomicBool::new(false),
        }),
        Arc::new(DefaultClock),
    );
    let rt = test_runtime();

    let (unit_id, result, still_there) = rt.block_on(async {
        let division = insert_division(&pool, "1").await;
        let unit = registry
            .create(CreateForemanUnitRequest::new(division.id(), "Kemandoran A"))
            .await
            .expect("create");
        let task = Task::new(unit.id(), "Panen blok 7", &DefaultClock).expect("task");
        ledger.record(&task).await.expect("record");

        let result = registry.delete(unit.id()).await;
        let still_there = registry.find_by_id(unit.id()).await.expect("lookup");
        (unit.id(), result, still_there)
    });

    assert!(matches!(
        result,
        Err(ForemanUnitRegistryError::HasDependentTasks { id, count: 1 }) if id == unit_id
    ));
    assert!(still_there.is_some());
}

#[rstest]
fn store_refuses_to_remove_a_referenced_unit(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_still_referenced_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 2).expect("pool setup");
    let registry = registry_over(&pool);
    let units = PostgresForemanUnitRepository::new(pool.clone());
    let ledger = PostgresTaskLedger::new(pool.clone());
    let rt = test_runtime();

    let (unit_id, result) = rt.block_on(async {
        let division = insert_division(&pool, "1").await;
        let unit = registry
            .create(CreateForemanUnitRequest::new(division.id(), "Kemandoran A"))
            .await
            .expect("create");
        let task = Task::new(unit.id(), "Pupuk", &DefaultClock).expect("task");
        ledger.record(&task).await.expect("record");
        (unit.id(), units.remove(unit.id()).await)
    });

    assert!(matches!(
        result,
        Err(ForemanUnitRepositoryError::StillReferenced(id)) if id == unit_id
    ));
}

#[rstest]
fn unreferenced_unit_is_deleted_and_its_code_freed(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_delete_frees_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 2).expect("pool setup");
    let registry = registry_over(&pool);
    let rt = test_runtime();

    let (by_id, by_code, again) = rt.block_on(async {
        let division = insert_division(&pool, "1").await;
        let unit = registry
            .create(CreateForemanUnitRequest::new(division.id(), "Kemandoran A"))
            .await
            .expect("create");
        registry.delete(unit.id()).await.expect("delete");
        let by_id = registry.find_by_id(unit.id()).await.expect("lookup");
        let by_code = registry.find_by_code("K1-001").await.expect("lookup");
        let again = registry.delete(unit.id()).await;
        (by_id, by_code, again)
    });

    assert!(by_id.is_none());
    assert!(by_code.is_none());
    assert!(matches!(again, Err(ForemanUnitRegistryError::NotFound(_))));
}

#[rstest]
fn tasks_for_missing_units_are_refused(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_task_fk_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 1).expect("pool setup");
    let ledger = PostgresTaskLedger::new(pool.clone());
    let rt = test_runtime();

    let missing = ForemanUnitId::new();
    let task = Task::new(missing, "Panen", &DefaultClock).expect("task");
    let result = rt.block_on(ledger.record(&task));

    assert!(matches!(
        result,
        Err(TaskLedgerError::ForemanUnitNotFound(id)) if id == missing
    ));
}

#[rstest]
fn task_counts_are_grouped_per_unit(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_task_counts_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 2).expect("pool setup");
    let registry = registry_over(&pool);
    let ledger = PostgresTaskLedger::new(pool.clone());
    let rt = test_runtime();

    let (busy, idle, counts, code) = rt.block_on(async {
        let division = insert_division(&pool, "1").await;
        let busy = registry
            .create(CreateForemanUnitRequest::new(division.id(), "Kemandoran A"))
            .await
            .expect("create");
        let idle = registry
            .create(CreateForemanUnitRequest::new(division.id(), "Kemandoran B"))
            .await
            .expect("create");
        for title in ["Panen", "Pupuk", "Semprot"] {
            let task = Task::new(busy.id(), title, &DefaultClock).expect("task");
            ledger.record(&task).await.expect("record");
        }
        let counts = ledger
            .counts_for_units(&[busy.id(), idle.id()])
            .await
            .expect("counts");
        let code = ForemanUnitCode::parse("K1-002").expect("code");
        let found = PostgresForemanUnitRepository::new(pool.clone())
            .find_by_code(&code)
            .await
            .expect("lookup");
        (busy.id(), idle.id(), counts, found.map(|unit| unit.id()))
    });

    assert_eq!(counts.get(&busy), Some(&3));
    assert_eq!(counts.get(&idle).copied().unwrap_or_default(), 0);
    assert_eq!(code, Some(idle));
}
