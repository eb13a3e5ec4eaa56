//! Domain model for calling principals and their sessions.
//!
//! Principals are supplied per request and never persisted by the registry
//! core. Session tokens are opaque; their format belongs to whichever
//! session adapter issued them.

mod error;
mod principal;
mod session;

pub use error::{AuthorizationError, ParseRoleError};
pub use principal::{Principal, PrincipalId, Role};
pub use session::{RequestContext, SessionToken};
