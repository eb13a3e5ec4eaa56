//! Registry API facade.
//!
//! Every request enters through [`RegistryApi`]: the identity gate resolves
//! the caller, the mutation gateway checks the role the operation demands,
//! and only then does the division directory, foreman unit registry, or task
//! ledger run. All outcomes are reported through [`RegistryError`].

mod api;
mod error;
mod seed;

pub use api::RegistryApi;
pub use error::{RegistryError, RegistryResult, StatusClass};
pub use seed::{SeedReport, seed_defaults};

#[cfg(test)]
mod tests;
