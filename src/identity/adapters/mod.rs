//! Adapter implementations for session resolution.

pub mod memory;
