//! `PostgreSQL` adapter for foreman unit persistence.

mod models;
mod repository;

pub use repository::PostgresForemanUnitRepository;

#[cfg(test)]
pub(crate) use models::{ForemanUnitRow, NewForemanUnitRow};
#[cfg(test)]
pub(crate) use repository::row_to_unit;
