//! Partial updates against `PostgreSQL`.

use crate::postgres::helpers::{
    CleanupGuard, insert_division, registry_over, setup_pool, test_runtime,
};
use estate_registry::division::domain::DivisionId;
use estate_registry::foreman_unit::{
    adapters::postgres::PostgresForemanUnitRepository,
    domain::{ForemanUnitChanges, ForemanUnitId},
    ports::{ForemanUnitRepository, ForemanUnitRepositoryError},
    services::{CreateForemanUnitRequest, ForemanUnitRegistryError, UpdateForemanUnitRequest},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
fn repoint_to_missing_division_is_refused(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_repoint_missing_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 2).expect("pool setup");
    let registry = registry_over(&pool);
    let units = PostgresForemanUnitRepository::new(pool.clone());
    let rt = test_runtime();
    let missing = DivisionId::new();

    let (original, from_store, from_service, reloaded) = rt.block_on(async {
        let division = insert_division(&pool, "1").await;
        let unit = registry
            .create(CreateForemanUnitRequest::new(division.id(), "Kemandoran A"))
            .await
            .expect("create");
        let from_store = units
            .apply_changes(unit.id(), &ForemanUnitChanges::new(&DefaultClock).repoint(missing))
            .await;
        let from_service = registry
            .update(unit.id(), UpdateForemanUnitRequest::new().with_division(missing))
            .await;
        let reloaded = registry
            .find_by_id(unit.id())
            .await
            .expect("lookup")
            .expect("unit should remain");
        (unit, from_store, from_service, reloaded)
    });

    assert!(matches!(
        from_store,
        Err(ForemanUnitRepositoryError::DivisionNotFound(id)) if id == missing
    ));
    assert!(matches!(
        from_service,
        Err(ForemanUnitRegistryError::DivisionNotFound(id)) if id == missing
    ));
    assert_eq!(reloaded.division_id(), original.division_id());
    assert_eq!(reloaded.code(), original.code());
}

#[rstest]
fn changes_to_a_missing_unit_are_not_found(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_update_missing_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 1).expect("pool setup");
    let units = PostgresForemanUnitRepository::new(pool.clone());
    let rt = test_runtime();
    let missing = ForemanUnitId::new();

    let result = rt.block_on(
        units.apply_changes(missing, &ForemanUnitChanges::new(&DefaultClock).set_active(false)),
    );

    assert!(matches!(
        result,
        Err(ForemanUnitRepositoryError::NotFound(id)) if id == missing
    ));
}

#[rstest]
fn concurrent_partial_updates_both_land(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_concurrent_updates_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 4).expect("pool setup");
    let registry = Arc::new(registry_over(&pool));
    let rt = test_runtime();

    let stored = rt.block_on(async {
        let division = insert_division(&pool, "1").await;
        let unit = registry
            .create(
                CreateForemanUnitRequest::new(division.id(), "Kemandoran A")
                    .with_foreman("Pak Budi"),
            )
            .await
            .expect("create");

        let renaming = tokio::spawn({
            let service = Arc::clone(&registry);
            let id = unit.id();
            async move {
                service
                    .update(id, UpdateForemanUnitRequest::new().with_name("Kemandoran X"))
                    .await
            }
        });
        let retiring = tokio::spawn({
            let service = Arc::clone(&registry);
            let id = unit.id();
            async move {
                service
                    .update(id, UpdateForemanUnitRequest::new().with_active(false))
                    .await
            }
        });
        renaming.await.expect("join").expect("rename");
        retiring.await.expect("join").expect("deactivate");

        registry
            .find_by_id(unit.id())
            .await
            .expect("lookup")
            .expect("unit should exist")
    });

    assert_eq!(stored.name(), "Kemandoran X");
    assert!(!stored.is_active());
    assert!(!stored.is_vacant());
    assert_eq!(stored.code().as_str(), "K1-001");
}

#[rstest]
fn vacating_and_clearing_description_persist(shared_test_cluster: &'static TestCluster) {
    let db_name = format!("test_vacate_{}", uuid::Uuid::new_v4());
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let pool = setup_pool(shared_test_cluster, &db_name, 2).expect("pool setup");
    let registry = registry_over(&pool);
    let rt = test_runtime();

    let (updated, reloaded) = rt.block_on(async {
        let division = insert_division(&pool, "1").await;
        let unit = registry
            .create(
                CreateForemanUnitRequest::new(division.id(), "Kemandoran A")
                    .with_foreman("Pak Budi")
                    .with_description("Blok utara"),
            )
            .await
            .expect("create");
        let updated = registry
            .update(
                unit.id(),
                UpdateForemanUnitRequest::new().vacate().clear_description(),
            )
            .await
            .expect("update");
        let reloaded = registry
            .find_by_id(unit.id())
            .await
            .expect("lookup")
            .expect("unit should exist");
        (updated, reloaded)
    });

    assert!(reloaded.is_vacant());
    assert!(reloaded.description().is_none());
    assert_eq!(reloaded.name(), "Kemandoran A");
    assert_eq!(reloaded.id(), updated.id());
    assert!(updated.is_vacant());
}
