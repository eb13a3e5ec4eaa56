//! Shared `PostgreSQL` plumbing for the registry adapters.
//!
//! All three registry tables live in one schema so that the foreman unit
//! adapter can lock its owning division row and count dependent tasks
//! inside a single transaction.

pub mod postgres;
pub mod schema;

pub use postgres::{RegistryPgPool, apply_migrations, reset_registry};
