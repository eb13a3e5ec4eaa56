//! Adapter implementations for the task ledger.

pub mod memory;
pub mod postgres;
