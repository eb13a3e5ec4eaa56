//! `PostgreSQL` adapter for division persistence.

mod models;
mod repository;

pub use repository::PostgresDivisionRepository;

#[cfg(test)]
pub(crate) use models::DivisionRow;
#[cfg(test)]
pub(crate) use repository::row_to_division;
