//! `PostgreSQL` repository implementation for divisions.

use super::models::{DivisionRow, NewDivisionRow};
use crate::division::{
    domain::{Division, DivisionCode, DivisionId, PersistedDivisionData},
    ports::{DivisionRepository, DivisionRepositoryError, DivisionRepositoryResult},
};
use crate::storage::{
    RegistryPgPool,
    postgres::{get_conn_with, run_blocking_with},
    schema::divisions,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Name of the unique index guarding division codes.
const CODE_UNIQUE_INDEX: &str = "idx_divisions_code";

/// `PostgreSQL`-backed division repository.
#[derive(Debug, Clone)]
pub struct PostgresDivisionRepository {
    pool: RegistryPgPool,
}

impl PostgresDivisionRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DivisionRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DivisionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection =
                    get_conn_with(&pool, DivisionRepositoryError::persistence)?;
                f(&mut connection)
            },
            DivisionRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl DivisionRepository for PostgresDivisionRepository {
    async fn insert(&self, division: &Division) -> DivisionRepositoryResult<()> {
        let division_id = division.id();
        let code = division.code().clone();
        let new_row = NewDivisionRow {
            id: division_id.into_inner(),
            code: code.as_str().to_owned(),
            name: division.name().to_owned(),
            description: division.description().map(str::to_owned),
            created_at: division.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(divisions::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some(CODE_UNIQUE_INDEX) =>
                    {
                        DivisionRepositoryError::DuplicateCode(code.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        DivisionRepositoryError::DuplicateDivision(division_id)
                    }
                    _ => DivisionRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: DivisionId) -> DivisionRepositoryResult<Option<Division>> {
        self.run_blocking(move |connection| {
            let row = divisions::table
                .filter(divisions::id.eq(id.into_inner()))
                .select(DivisionRow::as_select())
                .first::<DivisionRow>(connection)
                .optional()
                .map_err(DivisionRepositoryError::persistence)?;
            row.map(row_to_division).transpose()
        })
        .await
    }

    async fn find_by_code(
        &self,
        code: &DivisionCode,
    ) -> DivisionRepositoryResult<Option<Division>> {
        let code_str = code.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = divisions::table
                .filter(divisions::code.eq(&code_str))
                .select(DivisionRow::as_select())
                .first::<DivisionRow>(connection)
                .optional()
                .map_err(DivisionRepositoryError::persistence)?;
            row.map(row_to_division).transpose()
        })
        .await
    }

    async fn list_all(&self) -> DivisionRepositoryResult<Vec<Division>> {
        self.run_blocking(move |connection| {
            let rows = divisions::table
                .order((divisions::created_at.desc(), divisions::id.desc()))
                .select(DivisionRow::as_select())
                .load::<DivisionRow>(connection)
                .map_err(DivisionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_division).collect()
        })
        .await
    }
}

/// Rebuilds a [`Division`] from a stored row.
pub(crate) fn row_to_division(row: DivisionRow) -> DivisionRepositoryResult<Division> {
    let DivisionRow {
        id,
        code,
        name,
        description,
        created_at,
    } = row;

    let parsed_code =
        DivisionCode::new(code).map_err(DivisionRepositoryError::invalid_persisted_data)?;

    Ok(Division::from_persisted(PersistedDivisionData {
        id: DivisionId::from_uuid(id),
        code: parsed_code,
        name,
        description,
        created_at,
    }))
}
