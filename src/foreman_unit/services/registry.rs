//! Service layer for the foreman unit registry.

use super::{CreateForemanUnitRequest, UpdateForemanUnitRequest};
use crate::division::{
    domain::{Division, DivisionId},
    ports::{DivisionRepository, DivisionRepositoryError},
};
use crate::foreman_unit::{
    domain::{
        Assignment, ForemanUnit, ForemanUnitChanges, ForemanUnitCode, ForemanUnitDomainError,
        ForemanUnitFilter, ForemanUnitId, NewForemanUnit,
    },
    ports::{ForemanUnitRepository, ForemanUnitRepositoryError},
};
use crate::task::ports::{TaskLedger, TaskLedgerError};
use mockable::Clock;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// A foreman unit together with its division and task count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForemanUnitListing {
    /// The unit itself.
    pub unit: ForemanUnit,
    /// The owning division, when it still resolves.
    pub division: Option<Division>,
    /// Number of tasks referencing the unit.
    pub task_count: u64,
}

/// A division with the number of foreman units and tasks it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DivisionSummary {
    /// The division.
    pub division: Division,
    /// Units owned by the division, active or not.
    pub foreman_unit_count: u64,
    /// Tasks recorded against any of those units.
    pub task_count: u64,
}

/// Service-level errors for foreman unit registry operations.
#[derive(Debug, Error)]
pub enum ForemanUnitRegistryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ForemanUnitDomainError),

    /// The referenced division does not exist.
    #[error("division not found: {0}")]
    DivisionNotFound(DivisionId),

    /// The foreman unit does not exist.
    #[error("foreman unit not found: {0}")]
    NotFound(ForemanUnitId),

    /// Tasks still reference the unit.
    #[error("foreman unit {id} still has {count} task(s)")]
    HasDependentTasks {
        /// The unit that could not be deleted.
        id: ForemanUnitId,
        /// Number of dependent tasks.
        count: u64,
    },

    /// Foreman unit repository failure.
    #[error(transparent)]
    Repository(ForemanUnitRepositoryError),

    /// Division repository failure.
    #[error(transparent)]
    Division(#[from] DivisionRepositoryError),

    /// Task ledger failure.
    #[error(transparent)]
    Ledger(#[from] TaskLedgerError),
}

impl From<ForemanUnitRepositoryError> for ForemanUnitRegistryError {
    fn from(err: ForemanUnitRepositoryError) -> Self {
        match err {
            ForemanUnitRepositoryError::NotFound(id) => Self::NotFound(id),
            ForemanUnitRepositoryError::DivisionNotFound(id) => Self::DivisionNotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for foreman unit registry operations.
pub type ForemanUnitRegistryResult<T> = Result<T, ForemanUnitRegistryError>;

/// Foreman unit registry orchestration service.
#[derive(Clone)]
pub struct ForemanUnitRegistryService<D, U, T, C>
where
    D: DivisionRepository,
    U: ForemanUnitRepository,
    T: TaskLedger,
    C: Clock + Send + Sync,
{
    divisions: Arc<D>,
    units: Arc<U>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<D, U, T, C> ForemanUnitRegistryService<D, U, T, C>
where
    D: DivisionRepository,
    U: ForemanUnitRepository,
    T: TaskLedger,
    C: Clock + Send + Sync,
{
    /// Creates a new registry service.
    #[must_use]
    pub const fn new(divisions: Arc<D>, units: Arc<U>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            divisions,
            units,
            tasks,
            clock,
        }
    }

    /// Creates a foreman unit with the next code of its division.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRegistryError::DivisionNotFound`] when the
    /// division does not resolve, [`ForemanUnitRegistryError::Domain`] for an
    /// invalid name, or [`ForemanUnitRegistryError::Repository`] when the
    /// store fails.
    pub async fn create(
        &self,
        request: CreateForemanUnitRequest,
    ) -> ForemanUnitRegistryResult<ForemanUnit> {
        let CreateForemanUnitRequest {
            division_id,
            name,
            foreman_name,
            description,
        } = request;

        let division = self.require_division(division_id).await?;
        let assignment = Assignment::from_input(foreman_name)?;
        let draft = NewForemanUnit::new(division_id, name, assignment, description, &*self.clock)?;
        let unit = self.units.insert_next_in_division(&division, draft).await?;

        tracing::info!(
            foreman_unit_id = %unit.id(),
            code = %unit.code(),
            division = %division.code(),
            vacant = unit.is_vacant(),
            "foreman unit created"
        );
        Ok(unit)
    }

    /// Applies a partial update. The unit's code is never recomputed, even
    /// when it moves to another division.
    ///
    /// Every supplied field is validated before anything is written, and
    /// only the supplied fields change: the store applies them to the row
    /// as it stands at write time.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRegistryError::NotFound`] when the unit does not
    /// exist, [`ForemanUnitRegistryError::DivisionNotFound`] when the new
    /// division does not resolve, or [`ForemanUnitRegistryError::Domain`]
    /// for an invalid name.
    pub async fn update(
        &self,
        id: ForemanUnitId,
        request: UpdateForemanUnitRequest,
    ) -> ForemanUnitRegistryResult<ForemanUnit> {
        let current = self.require_unit(id).await?;
        if request.is_empty() {
            return Ok(current);
        }

        let changes = Self::changes_from(request, &*self.clock)?;
        if let Some(target) = changes
            .division_id()
            .filter(|candidate| *candidate != current.division_id())
        {
            self.require_division(target).await?;
        }

        let unit = self.units.apply_changes(id, &changes).await?;
        tracing::info!(
            foreman_unit_id = %unit.id(),
            code = %unit.code(),
            vacant = unit.is_vacant(),
            active = unit.is_active(),
            "foreman unit updated"
        );
        Ok(unit)
    }

    /// Deletes a unit that no task references and frees its code.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRegistryError::NotFound`] when the unit does not
    /// exist, or [`ForemanUnitRegistryError::HasDependentTasks`] when tasks
    /// still reference it.
    pub async fn delete(&self, id: ForemanUnitId) -> ForemanUnitRegistryResult<()> {
        let unit = self.require_unit(id).await?;

        let count = self.tasks.count_by_foreman_unit(id).await?;
        if count > 0 {
            return Err(Self::dependent_tasks(&unit, count));
        }

        match self.units.remove(id).await {
            Ok(()) => {
                tracing::info!(foreman_unit_id = %id, code = %unit.code(), "foreman unit deleted");
                Ok(())
            }
            // A task was recorded between the count and the delete.
            Err(ForemanUnitRepositoryError::StillReferenced(_)) => {
                let recount = self.tasks.count_by_foreman_unit(id).await?;
                Err(Self::dependent_tasks(&unit, recount.max(1)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Lists units matching `filter`, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRegistryError::Repository`] when lookup fails.
    pub async fn list(
        &self,
        filter: &ForemanUnitFilter,
    ) -> ForemanUnitRegistryResult<Vec<ForemanUnit>> {
        let units = self.units.list(filter).await?;
        tracing::debug!(
            count = units.len(),
            division_id = ?filter.division_id(),
            active_only = filter.active_only(),
            "listed foreman units"
        );
        Ok(units)
    }

    /// Lists units matching `filter` with their division and task count.
    ///
    /// # Errors
    ///
    /// Returns an error when any of the underlying lookups fails.
    pub async fn list_enriched(
        &self,
        filter: &ForemanUnitFilter,
    ) -> ForemanUnitRegistryResult<Vec<ForemanUnitListing>> {
        let units = self.list(filter).await?;
        if units.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<ForemanUnitId> = units.iter().map(ForemanUnit::id).collect();
        let counts = self.tasks.counts_for_units(&ids).await?;
        let divisions: HashMap<DivisionId, Division> = self
            .divisions
            .list_all()
            .await?
            .into_iter()
            .map(|division| (division.id(), division))
            .collect();

        Ok(units
            .into_iter()
            .map(|unit| ForemanUnitListing {
                division: divisions.get(&unit.division_id()).cloned(),
                task_count: counts.get(&unit.id()).copied().unwrap_or_default(),
                unit,
            })
            .collect())
    }

    /// Returns every division with the number of units it owns and the
    /// tasks recorded against them, most recently created division first.
    ///
    /// # Errors
    ///
    /// Returns an error when any of the underlying lookups fails.
    pub async fn summarize_divisions(&self) -> ForemanUnitRegistryResult<Vec<DivisionSummary>> {
        let divisions = self.divisions.list_all().await?;
        let units = self
            .units
            .list(&ForemanUnitFilter::new().including_inactive())
            .await?;
        let ids: Vec<ForemanUnitId> = units.iter().map(ForemanUnit::id).collect();
        let task_counts = if ids.is_empty() {
            HashMap::new()
        } else {
            self.tasks.counts_for_units(&ids).await?
        };

        let mut per_division: HashMap<DivisionId, (u64, u64)> = HashMap::new();
        for unit in &units {
            let tally = per_division.entry(unit.division_id()).or_default();
            tally.0 += 1;
            tally.1 += task_counts.get(&unit.id()).copied().unwrap_or_default();
        }

        Ok(divisions
            .into_iter()
            .map(|division| {
                let (foreman_unit_count, task_count) =
                    per_division.get(&division.id()).copied().unwrap_or_default();
                DivisionSummary {
                    division,
                    foreman_unit_count,
                    task_count,
                }
            })
            .collect())
    }

    /// Finds a unit by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRegistryError::Repository`] when lookup fails.
    pub async fn find_by_id(
        &self,
        id: ForemanUnitId,
    ) -> ForemanUnitRegistryResult<Option<ForemanUnit>> {
        Ok(self.units.find_by_id(id).await?)
    }

    /// Finds a unit by its generated code. A malformed code resolves to
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ForemanUnitRegistryError::Repository`] when lookup fails.
    pub async fn find_by_code(&self, code: &str) -> ForemanUnitRegistryResult<Option<ForemanUnit>> {
        let Ok(unit_code) = ForemanUnitCode::parse(code.trim()) else {
            return Ok(None);
        };
        Ok(self.units.find_by_code(&unit_code).await?)
    }

    async fn require_division(&self, id: DivisionId) -> ForemanUnitRegistryResult<Division> {
        self.divisions
            .find_by_id(id)
            .await?
            .ok_or(ForemanUnitRegistryError::DivisionNotFound(id))
    }

    async fn require_unit(&self, id: ForemanUnitId) -> ForemanUnitRegistryResult<ForemanUnit> {
        self.units
            .find_by_id(id)
            .await?
            .ok_or(ForemanUnitRegistryError::NotFound(id))
    }

    fn changes_from(
        request: UpdateForemanUnitRequest,
        clock: &C,
    ) -> ForemanUnitRegistryResult<ForemanUnitChanges> {
        let UpdateForemanUnitRequest {
            name,
            foreman_name,
            division_id,
            description,
            active,
        } = request;

        let mut changes = ForemanUnitChanges::new(clock);
        if let Some(new_name) = name {
            changes = changes.rename(new_name)?;
        }
        if let Some(foreman_input) = foreman_name {
            changes = changes.reassign(Assignment::from_input(foreman_input)?);
        }
        if let Some(target) = division_id {
            changes = changes.repoint(target);
        }
        if let Some(new_description) = description {
            changes = changes.describe(new_description);
        }
        if let Some(flag) = active {
            changes = changes.set_active(flag);
        }
        Ok(changes)
    }

    fn dependent_tasks(unit: &ForemanUnit, count: u64) -> ForemanUnitRegistryError {
        tracing::warn!(
            foreman_unit_id = %unit.id(),
            code = %unit.code(),
            count,
            "refusing to delete foreman unit with dependent tasks"
        );
        ForemanUnitRegistryError::HasDependentTasks {
            id: unit.id(),
            count,
        }
    }
}
