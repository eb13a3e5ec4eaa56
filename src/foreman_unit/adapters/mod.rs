//! Adapter implementations for foreman unit persistence.

pub mod memory;
pub mod postgres;
