//! Role (group) repository trait (port)

use async_trait::async_trait;

use mygroup_shared::UserId;

use crate::domain::Group;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError>;
    /// Role names held by the user, in assignment order. The first is the
    /// primary role.
    async fn roles_for_user(&self, user_id: UserId) -> Result<Vec<String>, DomainError>;
    async fn assign_role(&self, user_id: UserId, group_id: i64) -> Result<(), DomainError>;
}
