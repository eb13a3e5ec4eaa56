//! Diesel row models for foreman unit persistence.

use crate::foreman_unit::domain::ForemanUnit;
use crate::storage::schema::foreman_units;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for foreman unit records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = foreman_units)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ForemanUnitRow {
    /// Internal unit identifier.
    pub id: uuid::Uuid,
    /// Generated unit code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Assigned foreman; `None` when vacant.
    pub foreman_name: Option<String>,
    /// Owning division.
    pub division_id: uuid::Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Soft-retirement flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for foreman unit records.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = foreman_units)]
pub struct NewForemanUnitRow {
    /// Internal unit identifier.
    pub id: uuid::Uuid,
    /// Generated unit code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Assigned foreman; `None` when vacant.
    pub foreman_name: Option<String>,
    /// Owning division.
    pub division_id: uuid::Uuid,
    /// Optional description.
    pub description: Option<String>,
    /// Soft-retirement flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&ForemanUnit> for NewForemanUnitRow {
    fn from(unit: &ForemanUnit) -> Self {
        Self {
            id: unit.id().into_inner(),
            code: unit.code().as_str().to_owned(),
            name: unit.name().to_owned(),
            foreman_name: unit
                .assignment()
                .foreman_name()
                .map(|name| name.as_str().to_owned()),
            division_id: unit.division_id().into_inner(),
            description: unit.description().map(str::to_owned),
            is_active: unit.is_active(),
            created_at: unit.created_at(),
            updated_at: unit.updated_at(),
        }
    }
}
