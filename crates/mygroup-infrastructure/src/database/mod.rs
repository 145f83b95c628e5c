//! Database module (PostgreSQL adapters)

pub mod connection;
pub mod error;
pub mod postgres;

pub use connection::{create_pool, run_migrations};
pub use postgres::{PgRoleRepository, PgTenantRepository, PgUserRepository};
