//! Estate registry: divisions, foreman units, and the tasks that pin them.
//!
//! This crate holds the business rules of a plantation's organizational
//! registry. Divisions own foreman units ("kemandoran"); foreman units
//! receive codes derived from their division (`K1-001`, `K1-002`, ...);
//! units that tasks still reference cannot be deleted; and every mutation
//! is gated on the caller's role.
//!
//! # Architecture
//!
//! Each registry module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and sessions
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//!
//! # Modules
//!
//! - [`identity`]: Session resolution and role checks
//! - [`division`]: Division directory
//! - [`foreman_unit`]: Foreman unit registry and code generation
//! - [`task`]: Task ledger used for deletion safety
//! - [`registry`]: Role-gated API facade and default seeding
//! - [`config`]: Environment-driven settings
//! - [`storage`]: Shared `PostgreSQL` pool and schema

pub mod config;
pub mod division;
pub mod foreman_unit;
pub mod identity;
pub mod registry;
pub mod storage;
pub mod task;

mod text;
