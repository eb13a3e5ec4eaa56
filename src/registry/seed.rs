//! Default registry contents for a fresh estate.

use super::{RegistryApi, RegistryResult};
use crate::division::{domain::Division, ports::DivisionRepository, services::CreateDivisionRequest};
use crate::foreman_unit::{
    domain::ForemanUnit, ports::ForemanUnitRepository, services::CreateForemanUnitRequest,
};
use crate::identity::{domain::RequestContext, ports::SessionResolver};
use crate::task::ports::TaskLedger;
use mockable::Clock;
use serde::Serialize;

/// One default division and the foreman unit created beneath it.
struct SeedEntry {
    division_code: &'static str,
    division_name: &'static str,
    unit_name: &'static str,
    foreman_name: Option<&'static str>,
}

const DEFAULT_ENTRIES: [SeedEntry; 3] = [
    SeedEntry {
        division_code: "1",
        division_name: "Divisi 1",
        unit_name: "Kemandoran A",
        foreman_name: Some("Pak Budi"),
    },
    SeedEntry {
        division_code: "2",
        division_name: "Divisi 2",
        unit_name: "Kemandoran B",
        foreman_name: Some("Pak Ahmad"),
    },
    SeedEntry {
        division_code: "3",
        division_name: "Divisi 3",
        unit_name: "Kemandoran C",
        foreman_name: None,
    },
];

/// Records created by [`seed_defaults`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Divisions in creation order.
    pub divisions: Vec<Division>,
    /// Foreman units in creation order.
    pub foreman_units: Vec<ForemanUnit>,
}

/// Creates divisions `1` to `3` with one foreman unit each.
///
/// The units receive `K1-001`, `K2-001`, and `K3-001`; the third is vacant.
/// Runs through the API, so `context` must carry an administrator session.
///
/// # Errors
///
/// Returns [`RegistryError::Unauthorized`](super::RegistryError::Unauthorized)
/// for non-admin callers and
/// [`RegistryError::DuplicateCode`](super::RegistryError::DuplicateCode) when
/// the registry is not empty.
pub async fn seed_defaults<S, D, U, T, C>(
    api: &RegistryApi<S, D, U, T, C>,
    context: &RequestContext,
) -> RegistryResult<SeedReport>
where
    S: SessionResolver,
    D: DivisionRepository,
    U: ForemanUnitRepository,
    T: TaskLedger,
    C: Clock + Send + Sync,
{
    let mut report = SeedReport::default();

    for entry in &DEFAULT_ENTRIES {
        let division = api
            .create_division(
                context,
                CreateDivisionRequest::new(entry.division_code, entry.division_name),
            )
            .await?;

        let mut request = CreateForemanUnitRequest::new(division.id(), entry.unit_name);
        if let Some(foreman) = entry.foreman_name {
            request = request.with_foreman(foreman);
        }
        let unit = api.create_foreman_unit(context, request).await?;

        tracing::info!(division = %division.code(), unit = %unit.code(), "seeded");
        report.divisions.push(division);
        report.foreman_units.push(unit);
    }

    Ok(report)
}
