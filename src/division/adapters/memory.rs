//! In-memory division repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::division::{
    domain::{Division, DivisionCode, DivisionId},
    ports::{DivisionRepository, DivisionRepositoryError, DivisionRepositoryResult},
};

/// Thread-safe in-memory division repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDivisionRepository {
    state: Arc<RwLock<InMemoryDivisionState>>,
}

#[derive(Debug, Default)]
struct InMemoryDivisionState {
    divisions: HashMap<DivisionId, StoredDivision>,
    code_index: HashMap<DivisionCode, DivisionId>,
    next_insertion: u64,
}

#[derive(Debug)]
struct StoredDivision {
    insertion: u64,
    division: Division,
}

impl InMemoryDivisionRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> DivisionRepositoryError {
    DivisionRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl DivisionRepository for InMemoryDivisionRepository {
    async fn insert(&self, division: &Division) -> DivisionRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;

        if state.divisions.contains_key(&division.id()) {
            return Err(DivisionRepositoryError::DuplicateDivision(division.id()));
        }
        if state.code_index.contains_key(division.code()) {
            return Err(DivisionRepositoryError::DuplicateCode(
                division.code().clone(),
            ));
        }

        let insertion = state.next_insertion;
        state.next_insertion += 1;
        state
            .code_index
            .insert(division.code().clone(), division.id());
        state.divisions.insert(
            division.id(),
            StoredDivision {
                insertion,
                division: division.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: DivisionId) -> DivisionRepositoryResult<Option<Division>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.divisions.get(&id).map(|stored| stored.division.clone()))
    }

    async fn find_by_code(
        &self,
        code: &DivisionCode,
    ) -> DivisionRepositoryResult<Option<Division>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .code_index
            .get(code)
            .and_then(|id| state.divisions.get(id))
            .map(|stored| stored.division.clone()))
    }

    async fn list_all(&self) -> DivisionRepositoryResult<Vec<Division>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut stored: Vec<&StoredDivision> = state.divisions.values().collect();
        stored.sort_by(|a, b| {
            b.division
                .created_at()
                .cmp(&a.division.created_at())
                .then_with(|| b.insertion.cmp(&a.insertion))
        });
        Ok(stored.into_iter().map(|s| s.division.clone()).collect())
    }
}
