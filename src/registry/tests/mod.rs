//! Unit tests for the registry facade.
