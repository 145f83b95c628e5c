//! Repository traits (ports)

pub mod user_repository;
pub mod tenant_repository;
pub mod role_repository;

pub use user_repository::UserRepository;
pub use tenant_repository::TenantRepository;
pub use role_repository::RoleRepository;

#[cfg(test)]
pub use role_repository::MockRoleRepository;
#[cfg(test)]
pub use tenant_repository::MockTenantRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
