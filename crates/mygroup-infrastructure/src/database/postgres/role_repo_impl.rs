// ============================================================================
// MyGroup Infrastructure - PostgreSQL Role Repository
// File: crates/mygroup-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mygroup_core::domain::Group;
use mygroup_core::error::DomainError;
use mygroup_core::repositories::RoleRepository;
use mygroup_shared::UserId;

use crate::database::error::map_sqlx_error;

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GroupRow {
    id: i64,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<GroupRow> for Group {
    fn from(row: GroupRow) -> Self {
        Group {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            "SELECT id, name, description, created_at, updated_at FROM groups WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("finding role by name", e))?;

        Ok(row.map(Group::from))
    }

    async fn roles_for_user(&self, user_id: UserId) -> Result<Vec<String>, DomainError> {
        // Assignment order decides the primary role.
        sqlx::query_scalar(
            r#"
            SELECT g.name
            FROM users_groups ug
            JOIN groups g ON g.id = ug.group_id
            WHERE ug.user_id = $1
            ORDER BY ug.assigned_at, g.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("loading user roles", e))
    }

    async fn assign_role(&self, user_id: UserId, group_id: i64) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users_groups (user_id, group_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, group_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("assigning role", e))?;
        Ok(())
    }
}
