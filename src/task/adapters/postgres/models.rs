//! Diesel row models for task persistence.

use crate::storage::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning foreman unit.
    pub foreman_unit_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning foreman unit.
    pub foreman_unit_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
