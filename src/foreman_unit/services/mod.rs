//! Application services for the foreman unit registry.

mod registry;
mod requests;

pub use registry::{
    DivisionSummary, ForemanUnitListing, ForemanUnitRegistryError, ForemanUnitRegistryResult,
    ForemanUnitRegistryService,
};
pub use requests::{CreateForemanUnitRequest, UpdateForemanUnitRequest};
