//! In-memory foreman unit repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::division::domain::{Division, DivisionId};
use crate::foreman_unit::{
    domain::{
        ForemanUnit, ForemanUnitChanges, ForemanUnitCode, ForemanUnitFilter, ForemanUnitId,
        NewForemanUnit, UnitSequence,
    },
    ports::{ForemanUnitRepository, ForemanUnitRepositoryError, ForemanUnitRepositoryResult},
};

/// Thread-safe in-memory foreman unit repository.
///
/// A single lock covers count, code selection, and insert, so concurrent
/// creations never observe the same sequence. Changesets are applied under
/// the same write lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryForemanUnitRepository {
    state: Arc<RwLock<InMemoryUnitState>>,
}

#[derive(Debug, Default)]
struct InMemoryUnitState {
    units: HashMap<ForemanUnitId, StoredUnit>,
    code_index: HashMap<ForemanUnitCode, ForemanUnitId>,
    next_insertion: u64,
}

#[derive(Debug)]
struct StoredUnit {
    insertion: u64,
    unit: ForemanUnit,
}

impl InMemoryForemanUnitRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> ForemanUnitRepositoryError {
    ForemanUnitRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

impl InMemoryUnitState {
    fn count_in_division(&self, division_id: DivisionId) -> u64 {
        let count = self
            .units
            .values()
            .filter(|stored| stored.unit.division_id() == division_id)
            .count();
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    fn next_free_code(
        &self,
        division: &Division,
    ) -> ForemanUnitRepositoryResult<ForemanUnitCode> {
        let mut sequence = UnitSequence::after_count(self.count_in_division(division.id()))?;
        loop {
            let code = ForemanUnitCode::derive(division.code(), sequence);
            if !self.code_index.contains_key(&code) {
                return Ok(code);
            }
            sequence = sequence.next()?;
        }
    }
}

#[async_trait]
impl ForemanUnitRepository for InMemoryForemanUnitRepository {
    async fn insert_next_in_division(
        &self,
        division: &Division,
        draft: NewForemanUnit,
    ) -> ForemanUnitRepositoryResult<ForemanUnit> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.units.contains_key(&draft.id()) {
            return Err(ForemanUnitRepositoryError::DuplicateUnit(draft.id()));
        }

        let code = state.next_free_code(division)?;
        let unit = draft.into_unit(code);
        let insertion = state.next_insertion;
        state.next_insertion += 1;
        state.code_index.insert(unit.code().clone(), unit.id());
        state.units.insert(
            unit.id(),
            StoredUnit {
                insertion,
                unit: unit.clone(),
            },
        );
        Ok(unit)
    }

    async fn apply_changes(
        &self,
        id: ForemanUnitId,
        changes: &ForemanUnitChanges,
    ) -> ForemanUnitRepositoryResult<ForemanUnit> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .units
            .get_mut(&id)
            .ok_or(ForemanUnitRepositoryError::NotFound(id))?;

        stored.unit.apply(changes);
        Ok(stored.unit.clone())
    }

    async fn remove(&self, id: ForemanUnitId) -> ForemanUnitRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .units
            .remove(&id)
            .ok_or(ForemanUnitRepositoryError::NotFound(id))?;
        state.code_index.remove(removed.unit.code());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: ForemanUnitId,
    ) -> ForemanUnitRepositoryResult<Option<ForemanUnit>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.units.get(&id).map(|stored| stored.unit.clone()))
    }

    async fn find_by_code(
        &self,
        code: &ForemanUnitCode,
    ) -> ForemanUnitRepositoryResult<Option<ForemanUnit>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .code_index
            .get(code)
            .and_then(|id| state.units.get(id))
            .map(|stored| stored.unit.clone()))
    }

    async fn list(
        &self,
        filter: &ForemanUnitFilter,
    ) -> ForemanUnitRepositoryResult<Vec<ForemanUnit>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut matching: Vec<&StoredUnit> = state
            .units
            .values()
            .filter(|stored| {
                filter
                    .division_id()
                    .is_none_or(|id| stored.unit.division_id() == id)
            })
            .filter(|stored| !filter.active_only() || stored.unit.is_active())
            .collect();
        matching.sort_by(|a, b| {
            b.unit
                .created_at()
                .cmp(&a.unit.created_at())
                .then_with(|| b.insertion.cmp(&a.insertion))
        });
        Ok(matching.into_iter().map(|s| s.unit.clone()).collect())
    }

    async fn count_in_division(&self, division_id: DivisionId) -> ForemanUnitRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.count_in_division(division_id))
    }
}
