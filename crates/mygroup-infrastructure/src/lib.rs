//! # MyGroup Infrastructure
//!
//! PostgreSQL implementations of the core repository ports.

pub mod database;

pub use database::{create_pool, run_migrations, PgRoleRepository, PgTenantRepository, PgUserRepository};
