//! Request middleware

pub mod auth;
pub mod authorize;
pub mod error_detail;

pub use auth::{authenticate, AuthUser};
pub use authorize::{ensure_owner, require_owner, require_roles, OwnerGate, RoleGate};
pub use error_detail::expose_error_detail;
