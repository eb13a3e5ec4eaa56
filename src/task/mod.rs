//! Task ledger.
//!
//! Tasks are work items scoped to a foreman unit. The registry only needs
//! to know how many tasks reference a unit, so the ledger keeps a minimal
//! record per task and answers count queries. The module follows hexagonal
//! architecture:
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
