//! Caller identity resolution and role-based mutation gating.
//!
//! The identity module turns an opaque session token into a [`Principal`]
//! and decides whether that principal may perform a given operation. It
//! follows the same hexagonal layout as the registry modules:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The identity gate and mutation gateway in [`services`]
//!
//! [`Principal`]: domain::Principal

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
