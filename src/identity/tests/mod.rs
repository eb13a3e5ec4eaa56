//! Unit tests for identity resolution and authorization.
