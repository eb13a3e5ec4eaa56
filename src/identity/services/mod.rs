//! Identity gate and mutation gateway.

mod gate;
mod gateway;

pub use gate::IdentityGate;
pub use gateway::{RequiredRole, authorize};
