//! Diesel row models for division persistence.

use crate::storage::schema::divisions;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for division records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = divisions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DivisionRow {
    /// Internal division identifier.
    pub id: uuid::Uuid,
    /// Unique division code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for division records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = divisions)]
pub struct NewDivisionRow {
    /// Internal division identifier.
    pub id: uuid::Uuid,
    /// Unique division code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
