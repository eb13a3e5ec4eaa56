//! Domain model for foreman units.

mod assignment;
mod code;
mod error;
mod filter;
mod ids;
mod unit;

pub use assignment::{Assignment, ForemanName};
pub use code::{ForemanUnitCode, UnitSequence};
pub use error::ForemanUnitDomainError;
pub use filter::ForemanUnitFilter;
pub use ids::ForemanUnitId;
pub use unit::{ForemanUnit, ForemanUnitChanges, NewForemanUnit, PersistedForemanUnitData};
