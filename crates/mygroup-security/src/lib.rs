//! # MyGroup Security
//!
//! Token issuing/verification and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{JwtError, TokenClaims, TokenService};
pub use password::{PasswordError, PasswordService};
