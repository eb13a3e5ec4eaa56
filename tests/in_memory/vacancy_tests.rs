//! Integration tests for foreman assignment and vacancy.

use super::helpers::{Estate, estate};
use estate_registry::foreman_unit::{
    domain::Assignment, services::UpdateForemanUnitRequest,
};
use estate_registry::registry::RegistryError;
use rstest::rstest;

fn foreman(assignment: &Assignment) -> Option<&str> {
    assignment.foreman_name().map(|name| name.as_str())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn vacancy_round_trip(estate: Estate) {
    let division = estate.division("1").await;
    let unit = estate
        .unit_with_foreman(&division, "Kemandoran A", "Pak Budi")
        .await;
    let api = &estate.api;

    let vacated = api
        .update_foreman_unit(
            &estate.admin,
            unit.id(),
            UpdateForemanUnitRequest::new().assign_foreman(""),
        )
        .await
        .expect("vacate");
    assert!(vacated.is_vacant());

    let untouched = api
        .update_foreman_unit(
            &estate.admin,
            unit.id(),
            UpdateForemanUnitRequest::new().with_description("Blok utara"),
        )
        .await
        .expect("describe");
    assert!(untouched.is_vacant());

    let reassigned = api
        .update_foreman_unit(
            &estate.admin,
            unit.id(),
            UpdateForemanUnitRequest::new().assign_foreman(" Pak Joko "),
        )
        .await
        .expect("reassign");
    assert_eq!(foreman(reassigned.assignment()), Some("Pak Joko"));
    assert_eq!(reassigned.code(), unit.code());
    assert_eq!(reassigned.description(), Some("Blok utara"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test(flavor = "multi_thread")]
async fn blank_foreman_at_creation_is_vacant(estate: Estate, #[case] foreman_name: &str) {
    let division = estate.division("3").await;
    let unit = estate
        .unit_with_foreman(&division, "Kemandoran C", foreman_name)
        .await;
    assert!(unit.is_vacant());
    assert_eq!(unit.code().as_str(), "K3-001");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_rename_is_invalid_input(estate: Estate) {
    let division = estate.division("1").await;
    let unit = estate
        .unit_with_foreman(&division, "Kemandoran A", "Pak Budi")
        .await;

    let result = estate
        .api
        .update_foreman_unit(
            &estate.admin,
            unit.id(),
            UpdateForemanUnitRequest::new().with_name("  ").vacate(),
        )
        .await;
    assert!(matches!(result, Err(RegistryError::InvalidInput(_))));

    let stored = estate
        .api
        .get_foreman_unit(&estate.admin, unit.id())
        .await
        .expect("lookup")
        .expect("unit still exists");
    assert_eq!(foreman(stored.assignment()), Some("Pak Budi"));
}
