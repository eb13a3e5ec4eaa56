//! Shared helpers for `PostgreSQL` adapter integration tests.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use estate_registry::{
    division::{
        adapters::postgres::PostgresDivisionRepository,
        domain::{Division, DivisionCode},
        ports::DivisionRepository,
    },
    foreman_unit::{
        adapters::postgres::PostgresForemanUnitRepository, services::ForemanUnitRegistryService,
    },
    storage::{RegistryPgPool, apply_migrations},
    task::adapters::postgres::PostgresTaskLedger,
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use std::sync::Arc;
use tokio::runtime::Runtime;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Foreman unit registry wired over the `PostgreSQL` adapters.
pub type PgRegistry = ForemanUnitRegistryService<
    PostgresDivisionRepository,
    PostgresForemanUnitRepository,
    PostgresTaskLedger,
    DefaultClock,
>;

/// Template database name for the pre-migrated registry schema.
pub const TEMPLATE_DB: &str = "estate_registry_test_template";

/// Creates a multi-threaded runtime so blocking adapter calls overlap.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the registry schema applied.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            apply_migrations(&mut conn).map_err(|e| eyre::eyre!("schema setup failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Clones a test database from the template and opens a pool on it.
pub fn setup_pool(
    cluster: &TestCluster,
    db_name: &str,
    max_size: u32,
) -> Result<RegistryPgPool, BoxError> {
    ensure_template(cluster)?;
    cluster
        .create_database_from_template(db_name, TEMPLATE_DB)
        .map_err(|e| Box::new(e) as BoxError)?;
    let url = cluster.connection().database_url(db_name);
    Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(url))
        .map_err(|e| Box::new(e) as BoxError)
}

/// Wires the foreman unit registry over `pool`.
pub fn registry_over(pool: &RegistryPgPool) -> PgRegistry {
    ForemanUnitRegistryService::new(
        Arc::new(PostgresDivisionRepository::new(pool.clone())),
        Arc::new(PostgresForemanUnitRepository::new(pool.clone())),
        Arc::new(PostgresTaskLedger::new(pool.clone())),
        Arc::new(DefaultClock),
    )
}

/// Stores a division named after `code`.
pub async fn insert_division(pool: &RegistryPgPool, code: &str) -> Division {
    let division = Division::new(
        DivisionCode::new(code).expect("division code should be valid"),
        format!("Divisi {code}"),
        None,
        &DefaultClock,
    )
    .expect("division should build");
    PostgresDivisionRepository::new(pool.clone())
        .insert(&division)
        .await
        .expect("division insert should succeed");
    division
}

/// Drops the test database when the test ends, even on panic.
///
/// Declare the guard before the pool so the pool's connections close first.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl<'a> CleanupGuard<'a> {
    pub const fn new(cluster: &'a TestCluster, db_name: String) -> Self {
        Self { cluster, db_name }
    }
}

impl Drop for CleanupGuard<'_> {
    #[expect(
        clippy::print_stderr,
        reason = "Test cleanup warnings are informational"
    )]
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}
