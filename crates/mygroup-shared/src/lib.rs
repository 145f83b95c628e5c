//! # MyGroup Shared
//!
//! Configuration, telemetry, wire types and constants shared by every
//! MyGroup crate.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
