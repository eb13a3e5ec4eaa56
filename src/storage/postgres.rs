//! Connection pool type and blocking helpers for Diesel adapters.

use diesel::PgConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError, PooledConnection};
use diesel::result::QueryResult;

/// `PostgreSQL` connection pool shared by the registry adapters.
pub type RegistryPgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for adapter internals.
pub(crate) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Schema creation script for the registry tables.
pub const CREATE_REGISTRY_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_registry_tables/up.sql");

/// Applies the registry schema. Safe to run against an existing schema.
///
/// # Errors
///
/// Returns the Diesel error raised by the database.
pub fn apply_migrations(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute(CREATE_REGISTRY_TABLES_SQL)
}

/// Removes every task, foreman unit, and division row.
///
/// # Errors
///
/// Returns the Diesel error raised by the database.
pub fn reset_registry(connection: &mut PgConnection) -> QueryResult<()> {
    connection.batch_execute("TRUNCATE TABLE tasks, foreman_units, divisions")
}

/// Runs a blocking task and maps join errors into the caller's error type.
///
/// Diesel calls are synchronous; running them under
/// [`tokio::task::spawn_blocking`] keeps executor threads free.
pub(crate) async fn run_blocking_with<F, T, E, M>(f: F, map_err: M) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
    M: FnOnce(tokio::task::JoinError) -> E,
{
    tokio::task::spawn_blocking(f).await.map_err(map_err)?
}

/// Obtains a connection from the pool with a caller-provided error mapper.
pub(crate) fn get_conn_with<E, M>(pool: &RegistryPgPool, map_err: M) -> Result<PooledConn, E>
where
    M: FnOnce(PoolError) -> E,
{
    pool.get().map_err(map_err)
}
