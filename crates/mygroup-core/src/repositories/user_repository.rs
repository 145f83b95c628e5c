//! User repository trait (port)

use async_trait::async_trait;

use mygroup_shared::{TenantId, UserId};

use crate::domain::{NewUser, User};
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    /// User with `username` whose `group_id` is `tenant_id`.
    async fn find_by_username_in_tenant(
        &self,
        username: &str,
        tenant_id: TenantId,
    ) -> Result<Option<User>, DomainError>;
    /// User with `username` whose `company` column equals `company`.
    async fn find_by_username_in_company(
        &self,
        username: &str,
        company: &str,
    ) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;
    /// Sets `last_login` (epoch seconds).
    async fn update_last_login(&self, id: UserId, at: i64) -> Result<(), DomainError>;
}
