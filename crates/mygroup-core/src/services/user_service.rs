//! Profile lookups for authenticated callers

use std::sync::Arc;

use serde::Serialize;

use mygroup_shared::{UserId, UserProfile};

use crate::error::DomainError;
use crate::repositories::{RoleRepository, UserRepository};

#[derive(Debug, Clone, Serialize)]
pub struct UserWithRoles {
    pub user: UserProfile,
    pub roles: Vec<String>,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>, roles: Arc<dyn RoleRepository>) -> Self {
        Self { users, roles }
    }

    pub async fn profile(&self, id: UserId) -> Result<UserWithRoles, DomainError> {
        let user = self.users.find_by_id(id).await?.ok_or(DomainError::UserNotFound)?;
        let roles = self.roles.roles_for_user(user.id).await?;
        Ok(UserWithRoles {
            user: user.profile(),
            roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::User;
    use crate::repositories::{MockRoleRepository, MockUserRepository};

    #[tokio::test]
    async fn test_profile_includes_roles() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|id| {
            let now = Utc::now();
            Ok(Some(User {
                id,
                username: "lakshmi".into(),
                email: "lakshmi@example.com".into(),
                password_hash: "$2b$04$hash".into(),
                first_name: None,
                last_name: None,
                company: None,
                phone: None,
                profile_img: None,
                display_name: None,
                alter_number: None,
                created_on: None,
                last_login: None,
                active: true,
                group_id: None,
                created_at: now,
                updated_at: now,
            }))
        });
        let mut roles = MockRoleRepository::new();
        roles
            .expect_roles_for_user()
            .returning(|_| Ok(vec!["labor".to_string()]));

        let service = UserService::new(Arc::new(users), Arc::new(roles));
        let found = service.profile(8).await.unwrap();
        assert_eq!(found.user.id, 8);
        assert_eq!(found.roles, vec!["labor".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|_| Ok(None));
        let service = UserService::new(Arc::new(users), Arc::new(MockRoleRepository::new()));
        assert!(matches!(service.profile(1).await, Err(DomainError::UserNotFound)));
    }
}
