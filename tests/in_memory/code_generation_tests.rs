//! Integration tests for derived foreman unit codes.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::helpers::{Estate, codes, estate};
use estate_registry::foreman_unit::services::CreateForemanUnitRequest;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_units_of_division_one_are_k1_001_and_k1_002(estate: Estate) {
    let division = estate.division("1").await;

    let first = estate.unit(&division, "Kemandoran A").await;
    let second = estate
        .unit_with_foreman(&division, "Kemandoran B", "Pak Ahmad")
        .await;

    assert_eq!(first.code().as_str(), "K1-001");
    assert_eq!(second.code().as_str(), "K1-002");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn interleaved_creation_keeps_each_division_sequential(estate: Estate) {
    let one = estate.division("1").await;
    let two = estate.division("2").await;
    let three = estate.division("3").await;

    let mut in_three = Vec::new();
    for round in 0..4 {
        estate.unit(&one, &format!("Satu {round}")).await;
        in_three.push(estate.unit(&three, &format!("Tiga {round}")).await);
        estate.unit(&two, &format!("Dua {round}")).await;
    }

    assert_eq!(codes(&in_three), vec!["K3-001", "K3-002", "K3-003", "K3-004"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn codes_are_distinct_across_divisions(estate: Estate) {
    let mut created = Vec::new();
    for code in ["1", "2", "3"] {
        let division = estate.division(code).await;
        for name in ["A", "B"] {
            created.push(estate.unit(&division, name).await);
        }
    }

    let distinct: BTreeSet<String> = codes(&created).into_iter().collect();
    assert_eq!(distinct.len(), created.len());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creations_receive_distinct_sequential_codes(estate: Estate) {
    let division = estate.division("1").await;

    let mut handles = Vec::new();
    for index in 0..24 {
        let api = Arc::clone(&estate.api);
        let admin = estate.admin.clone();
        let division_id = division.id();
        handles.push(tokio::spawn(async move {
            api.create_foreman_unit(
                &admin,
                CreateForemanUnitRequest::new(division_id, format!("Kemandoran {index}")),
            )
            .await
        }));
    }

    let mut seen = BTreeSet::new();
    for handle in handles {
        let unit = handle
            .await
            .expect("task should not panic")
            .expect("creation should succeed");
        seen.insert(unit.code().to_string());
    }

    let expected: BTreeSet<String> = (1..=24).map(|n| format!("K1-{n:03}")).collect();
    assert_eq!(seen, expected);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sequences_past_999_keep_every_digit(estate: Estate) {
    let division = estate.division("1").await;

    let mut last = None;
    for index in 0..1000 {
        last = Some(estate.unit(&division, &format!("Unit {index}")).await);
    }

    let thousandth = last.expect("units were created");
    assert_eq!(thousandth.code().as_str(), "K1-1000");
}
