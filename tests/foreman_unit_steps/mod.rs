//! Step definitions for foreman unit registry scenarios.

pub mod then;
