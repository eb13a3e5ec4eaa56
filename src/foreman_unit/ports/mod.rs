//! Port contracts for foreman unit persistence.

pub mod repository;

pub use repository::{
    ForemanUnitRepository, ForemanUnitRepositoryError, ForemanUnitRepositoryResult,
};
