//! Adapter implementations for division persistence.

pub mod memory;
pub mod postgres;
