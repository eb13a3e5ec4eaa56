//! Port contracts for division persistence.

pub mod repository;

pub use repository::{DivisionRepository, DivisionRepositoryError, DivisionRepositoryResult};
