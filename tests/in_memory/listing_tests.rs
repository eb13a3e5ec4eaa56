//! Integration tests for filtered listings, summaries, and repointing.

use super::helpers::{Estate, estate};
use estate_registry::division::domain::DivisionId;
use estate_registry::foreman_unit::{
    domain::ForemanUnitFilter,
    services::{CreateForemanUnitRequest, UpdateForemanUnitRequest},
};
use estate_registry::registry::RegistryError;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_newest_first_and_enriched(estate: Estate) {
    let one = estate.division("1").await;
    let two = estate.division("2").await;
    let a = estate.unit(&one, "Kemandoran A").await;
    let b = estate.unit(&two, "Kemandoran B").await;
    estate
        .api
        .record_task(&estate.user, a.id(), "Panen")
        .await
        .expect("task");

    let listed = estate
        .api
        .list_foreman_units(&estate.user, &ForemanUnitFilter::default())
        .await
        .expect("listing");

    let summary: Vec<(String, Option<String>, u64)> = listed
        .iter()
        .map(|entry| {
            (
                entry.unit.code().to_string(),
                entry.division.as_ref().map(|d| d.code().to_string()),
                entry.task_count,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (b.code().to_string(), Some("2".to_owned()), 0),
            (a.code().to_string(), Some("1".to_owned()), 1),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn division_filter_narrows_the_listing(estate: Estate) {
    let one = estate.division("1").await;
    let two = estate.division("2").await;
    estate.unit(&one, "Kemandoran A").await;
    let b = estate.unit(&two, "Kemandoran B").await;

    let listed = estate
        .api
        .list_foreman_units(&estate.user, &ForemanUnitFilter::new().in_division(two.id()))
        .await
        .expect("listing");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().map(|entry| entry.unit.id()), Some(b.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repointed_unit_keeps_its_code(estate: Estate) {
    let one = estate.division("1").await;
    let two = estate.division("2").await;
    let unit = estate.unit(&one, "Kemandoran A").await;

    let moved = estate
        .api
        .update_foreman_unit(
            &estate.admin,
            unit.id(),
            UpdateForemanUnitRequest::new().with_division(two.id()),
        )
        .await
        .expect("repoint");
    assert_eq!(moved.code().as_str(), "K1-001");

    let listed = estate
        .api
        .list_foreman_units(&estate.user, &ForemanUnitFilter::new().in_division(two.id()))
        .await
        .expect("listing");
    assert_eq!(
        listed
            .first()
            .and_then(|entry| entry.division.as_ref())
            .map(|d| d.id()),
        Some(two.id())
    );

    let missing = DivisionId::new();
    let refused = estate
        .api
        .update_foreman_unit(
            &estate.admin,
            unit.id(),
            UpdateForemanUnitRequest::new().with_division(missing),
        )
        .await;
    assert!(matches!(refused, Err(RegistryError::DivisionNotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creation_under_a_missing_division_is_refused(estate: Estate) {
    let missing = DivisionId::new();
    let result = estate
        .api
        .create_foreman_unit(
            &estate.admin,
            CreateForemanUnitRequest::new(missing, "Kemandoran Z"),
        )
        .await;
    assert!(matches!(result, Err(RegistryError::DivisionNotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn division_summaries_count_their_units_and_tasks(estate: Estate) {
    let one = estate.division("1").await;
    estate.division("2").await;
    let busy = estate.unit(&one, "Kemandoran A").await;
    estate.unit(&one, "Kemandoran B").await;
    for title in ["Panen blok 1", "Pupuk blok 2"] {
        estate
            .api
            .record_task(&estate.user, busy.id(), title)
            .await
            .expect("task should record");
    }

    let summaries = estate
        .api
        .list_divisions_with_counts(&estate.user)
        .await
        .expect("summaries");
    let counts: Vec<(String, u64, u64)> = summaries
        .iter()
        .map(|s| (s.division.code().to_string(), s.foreman_unit_count, s.task_count))
        .collect();
    assert_eq!(
        counts,
        vec![("2".to_owned(), 0, 0), ("1".to_owned(), 2, 2)]
    );
}
