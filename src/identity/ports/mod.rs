//! Port contracts for session resolution.

pub mod session;

pub use session::{SessionLookupError, SessionResolver};
