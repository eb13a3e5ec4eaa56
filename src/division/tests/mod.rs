//! Unit tests for the division directory.
