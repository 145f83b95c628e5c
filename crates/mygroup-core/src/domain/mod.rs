//! # MyGroup Core - Domain Module
//!
//! Users, roles, tenants and the login profile table.

pub mod user;
pub mod group;
pub mod tenant;
pub mod role;
pub mod login;

pub use user::{NewUser, RegisterInput, User};
pub use group::Group;
pub use tenant::Tenant;
pub use role::{dashboard_route_for, has_any_role, Role};
pub use login::{Credentials, LoginKind, LoginProfile, LoginScope, TenantScope};
