//! Domain model for divisions.

mod code;
mod division;
mod error;
mod ids;

pub use code::DivisionCode;
pub use division::{Division, PersistedDivisionData};
pub use error::DivisionDomainError;
pub use ids::DivisionId;
