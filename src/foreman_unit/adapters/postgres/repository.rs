//! `PostgreSQL` repository implementation for foreman units.

use super::models::{ForemanUnitRow, NewForemanUnitRow};
use crate::division::domain::{Division, DivisionCode, DivisionId};
use crate::foreman_unit::{
    domain::{
        Assignment, ForemanUnit, ForemanUnitChanges, ForemanUnitCode, ForemanUnitFilter,
        ForemanUnitId, NewForemanUnit, PersistedForemanUnitData, UnitSequence,
    },
    ports::{ForemanUnitRepository, ForemanUnitRepositoryError, ForemanUnitRepositoryResult},
};
use crate::storage::{
    RegistryPgPool,
    postgres::{get_conn_with, run_blocking_with},
    schema::{divisions, foreman_units},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Name of the unique index guarding generated codes.
const CODE_UNIQUE_INDEX: &str = "idx_foreman_units_code";

/// `PostgreSQL`-backed foreman unit repository.
///
/// Creation locks the owning division row (`SELECT ... FOR UPDATE`) for the
/// duration of the count-and-insert transaction, serializing code
/// generation per division across every service instance sharing the
/// database. Updates lock the unit row the same way while they apply a
/// changeset.
#[derive(Debug, Clone)]
pub struct PostgresForemanUnitRepository {
    pool: RegistryPgPool,
}

impl PostgresForemanUnitRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: RegistryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ForemanUnitRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ForemanUnitRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection =
                    get_conn_with(&pool, ForemanUnitRepositoryError::persistence)?;
                f(&mut connection)
            },
            ForemanUnitRepositoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for ForemanUnitRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ForemanUnitRepository for PostgresForemanUnitRepository {
    async fn insert_next_in_division(
        &self,
        division: &Division,
        draft: NewForemanUnit,
    ) -> ForemanUnitRepositoryResult<ForemanUnit> {
        let division_id = division.id();

        self.run_blocking(move |connection| {
            connection.transaction::<_, ForemanUnitRepositoryError, _>(|tx| {
                let division_code = lock_division_code(tx, division_id)?;
                let code = next_free_code(tx, division_id, &division_code)?;
                let unit = draft.into_unit(code);
                let row = NewForemanUnitRow::from(&unit);

                diesel::insert_into(foreman_units::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                            if info.constraint_name() == Some(CODE_UNIQUE_INDEX) =>
                        {
                            ForemanUnitRepositoryError::DuplicateCode(unit.code().clone())
                        }
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            ForemanUnitRepositoryError::DuplicateUnit(unit.id())
                        }
                        _ => ForemanUnitRepositoryError::persistence(err),
                    })?;
                Ok(unit)
            })
        })
        .await
    }

    async fn apply_changes(
        &self,
        id: ForemanUnitId,
        changes: &ForemanUnitChanges,
    ) -> ForemanUnitRepositoryResult<ForemanUnit> {
        let changeset = changes.clone();

        self.run_blocking(move |connection| {
            connection.transaction::<_, ForemanUnitRepositoryError, _>(|tx| {
                let mut unit = foreman_units::table
                    .filter(foreman_units::id.eq(id.into_inner()))
                    .select(ForemanUnitRow::as_select())
                    .for_update()
                    .first::<ForemanUnitRow>(tx)
                    .optional()?
                    .map(row_to_unit)
                    .transpose()?
                    .ok_or(ForemanUnitRepositoryError::NotFound(id))?;
                unit.apply(&changeset);
                let target_division = unit.division_id();
                let row = NewForemanUnitRow::from(&unit);

                diesel::update(foreman_units::table.filter(foreman_units::id.eq(row.id)))
                    .set((
                        foreman_units::name.eq(&row.name),
                        foreman_units::foreman_name.eq(&row.foreman_name),
                        foreman_units::division_id.eq(row.division_id),
                        foreman_units::description.eq(&row.description),
                        foreman_units::is_active.eq(row.is_active),
                        foreman_units::updated_at.eq(row.updated_at),
                    ))
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                            ForemanUnitRepositoryError::DivisionNotFound(target_division)
                        }
                        _ => ForemanUnitRepositoryError::persistence(err),
                    })?;
                Ok(unit)
            })
        })
        .await
    }

    async fn remove(&self, id: ForemanUnitId) -> ForemanUnitRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(foreman_units::table.filter(foreman_units::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                            ForemanUnitRepositoryError::StillReferenced(id)
                        }
                        _ => ForemanUnitRepositoryError::persistence(err),
                    })?;

            if deleted == 0 {
                return Err(ForemanUnitRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: ForemanUnitId,
    ) -> ForemanUnitRepositoryResult<Option<ForemanUnit>> {
        self.run_blocking(move |connection| {
            let row = foreman_units::table
                .filter(foreman_units::id.eq(id.into_inner()))
                .select(ForemanUnitRow::as_select())
                .first::<ForemanUnitRow>(connection)
                .optional()?;
            row.map(row_to_unit).transpose()
        })
        .await
    }

    async fn find_by_code(
        &self,
        code: &ForemanUnitCode,
    ) -> ForemanUnitRepositoryResult<Option<ForemanUnit>> {
        let code_str = code.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = foreman_units::table
                .filter(foreman_units::code.eq(&code_str))
                .select(ForemanUnitRow::as_select())
                .first::<ForemanUnitRow>(connection)
                .optional()?;
            row.map(row_to_unit).transpose()
        })
        .await
    }

    async fn list(
        &self,
        filter: &ForemanUnitFilter,
    ) -> ForemanUnitRepositoryResult<Vec<ForemanUnit>> {
        let criteria = *filter;
        self.run_blocking(move |connection| {
            let mut query = foreman_units::table
                .select(ForemanUnitRow::as_select())
                .into_boxed();
            if let Some(division_id) = criteria.division_id() {
                query = query.filter(foreman_units::division_id.eq(division_id.into_inner()));
            }
            if criteria.active_only() {
                query = query.filter(foreman_units::is_active.eq(true));
            }
            let rows = query
                .order((foreman_units::created_at.desc(), foreman_units::id.desc()))
                .load::<ForemanUnitRow>(connection)?;
            rows.into_iter().map(row_to_unit).collect()
        })
        .await
    }

    async fn count_in_division(&self, division_id: DivisionId) -> ForemanUnitRepositoryResult<u64> {
        self.run_blocking(move |connection| count_units(connection, division_id))
            .await
    }
}

/// Locks the division row and returns its code.
fn lock_division_code(
    connection: &mut PgConnection,
    division_id: DivisionId,
) -> ForemanUnitRepositoryResult<DivisionCode> {
    let raw_code = divisions::table
        .filter(divisions::id.eq(division_id.into_inner()))
        .select(divisions::code)
        .for_update()
        .first::<String>(connection)
        .optional()?
        .ok_or(ForemanUnitRepositoryError::DivisionNotFound(division_id))?;
    DivisionCode::new(raw_code).map_err(ForemanUnitRepositoryError::invalid_persisted_data)
}

fn count_units(
    connection: &mut PgConnection,
    division_id: DivisionId,
) -> ForemanUnitRepositoryResult<u64> {
    let count: i64 = foreman_units::table
        .filter(foreman_units::division_id.eq(division_id.into_inner()))
        .count()
        .get_result(connection)?;
    u64::try_from(count).map_err(ForemanUnitRepositoryError::invalid_persisted_data)
}

/// Picks `count + 1`, skipping codes another unit already holds.
fn next_free_code(
    connection: &mut PgConnection,
    division_id: DivisionId,
    division_code: &DivisionCode,
) -> ForemanUnitRepositoryResult<ForemanUnitCode> {
    let mut sequence = UnitSequence::after_count(count_units(connection, division_id)?)?;
    loop {
        let candidate = ForemanUnitCode::derive(division_code, sequence);
        let taken: bool = diesel::select(diesel::dsl::exists(
            foreman_units::table.filter(foreman_units::code.eq(candidate.as_str())),
        ))
        .get_result(connection)?;
        if !taken {
            return Ok(candidate);
        }
        sequence = sequence.next()?;
    }
}

/// Rebuilds a [`ForemanUnit`] from a stored row.
pub(crate) fn row_to_unit(row: ForemanUnitRow) -> ForemanUnitRepositoryResult<ForemanUnit> {
    let ForemanUnitRow {
        id,
        code,
        name,
        foreman_name,
        division_id,
        description,
        is_active,
        created_at,
        updated_at,
    } = row;

    let parsed_code =
        ForemanUnitCode::parse(code).map_err(ForemanUnitRepositoryError::invalid_persisted_data)?;
    let assignment = Assignment::from_input(foreman_name)
        .map_err(ForemanUnitRepositoryError::invalid_persisted_data)?;

    Ok(ForemanUnit::from_persisted(PersistedForemanUnitData {
        id: ForemanUnitId::from_uuid(id),
        code: parsed_code,
        name,
        assignment,
        division_id: DivisionId::from_uuid(division_id),
        description,
        active: is_active,
        created_at,
        updated_at,
    }))
}
