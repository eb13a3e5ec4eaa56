//! Foreman unit ("kemandoran") registry.
//!
//! Foreman units are the sub-units of a division. Their codes are derived
//! by the registry from the owning division's code and a per-division
//! sequence (`K1-001`, `K1-002`, ...), assigned once and never rewritten.
//! A unit without a foreman is *vacant*, which is a normal state rather
//! than an error. Units with dependent tasks cannot be deleted; they are
//! deactivated instead.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
