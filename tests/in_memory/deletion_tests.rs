//! Integration tests for dependency-safe deletion.

use super::helpers::{Estate, estate};
use estate_registry::foreman_unit::{
    domain::{ForemanUnitFilter, ForemanUnitId},
    services::UpdateForemanUnitRequest,
};
use estate_registry::registry::{RegistryError, StatusClass};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unit_with_a_task_cannot_be_deleted(estate: Estate) {
    let division = estate.division("1").await;
    let unit = estate.unit(&division, "Kemandoran A").await;
    estate
        .api
        .record_task(&estate.user, unit.id(), "Panen blok 3")
        .await
        .expect("task should record");

    let result = estate.api.delete_foreman_unit(&estate.admin, unit.id()).await;

    assert!(matches!(
        result,
        Err(RegistryError::HasDependentTasks { id, count: 1 }) if id == unit.id()
    ));
    let still_there = estate
        .api
        .get_foreman_unit(&estate.admin, unit.id())
        .await
        .expect("lookup");
    assert_eq!(still_there, Some(unit));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_unit_is_not_found(estate: Estate) {
    let missing = ForemanUnitId::new();
    let result = estate.api.delete_foreman_unit(&estate.admin, missing).await;

    let err = result.expect_err("delete should fail");
    assert!(matches!(err, RegistryError::NotFound(id) if id == missing));
    assert_eq!(err.status_class(), StatusClass::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn freed_codes_are_not_duplicated(estate: Estate) {
    let division = estate.division("1").await;
    let first = estate.unit(&division, "Kemandoran A").await;
    let second = estate.unit(&division, "Kemandoran B").await;

    estate
        .api
        .delete_foreman_unit(&estate.admin, first.id())
        .await
        .expect("delete should succeed");
    let third = estate.unit(&division, "Kemandoran C").await;

    assert_eq!(second.code().as_str(), "K1-002");
    assert_ne!(third.code(), second.code());
    assert!(
        estate
            .api
            .get_foreman_unit_by_code(&estate.user, "K1-001")
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deactivation_is_the_alternative_to_deletion(estate: Estate) {
    let division = estate.division("1").await;
    let unit = estate.unit(&division, "Kemandoran A").await;
    estate
        .api
        .record_task(&estate.user, unit.id(), "Rawat jalan")
        .await
        .expect("task should record");

    let retired = estate
        .api
        .update_foreman_unit(
            &estate.admin,
            unit.id(),
            UpdateForemanUnitRequest::new().with_active(false),
        )
        .await
        .expect("deactivation should succeed");
    assert!(!retired.is_active());

    let active = estate
        .api
        .list_foreman_units(&estate.user, &ForemanUnitFilter::default())
        .await
        .expect("listing");
    assert!(active.is_empty());
}
