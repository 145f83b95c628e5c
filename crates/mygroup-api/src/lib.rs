//! # MyGroup API
//!
//! HTTP handlers, middleware and router for the MyGroup auth server.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::create_app;
pub use state::AppState;
