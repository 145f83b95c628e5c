//! # MyGroup Client
//!
//! Typed HTTP client for the MyGroup auth API plus the session-holding
//! [`AuthContext`] used by front ends.

pub mod api;
pub mod context;
pub mod error;
pub mod session;

pub use api::{AuthApi, LoginParams, LoginRequest, LoginTarget, RegisterRequest};
pub use context::{AuthContext, Navigation};
pub use error::ClientError;
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
