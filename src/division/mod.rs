//! Division directory.
//!
//! Divisions are the top-level organizational units of the estate. Each is
//! keyed by a short caller-assigned code (`"1"`, `"2"`, ...) that foreman
//! unit identifiers embed, so codes are unique and immutable once created.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
