// ============================================================================
// MyGroup Infrastructure - PostgreSQL User Repository
// File: crates/mygroup-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mygroup_core::domain::{NewUser, User};
use mygroup_core::error::DomainError;
use mygroup_core::repositories::UserRepository;
use mygroup_shared::{TenantId, UserId};

use crate::database::error::map_sqlx_error;

const USER_COLUMNS: &str = r#"
    id, username, email, password,
    first_name, last_name, company, phone,
    profile_img, display_name, alter_number,
    created_on, last_login, active, group_id,
    created_at, updated_at
"#;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, context: &str, sql: &str, binds: &[&str]) -> Result<Option<User>, DomainError> {
        let mut query = sqlx::query_as::<_, UserRow>(sql);
        for value in binds {
            query = query.bind(*value);
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(context, e))?;
        Ok(row.map(User::from))
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    first_name: Option<String>,
    last_name: Option<String>,
    company: Option<String>,
    phone: Option<String>,
    profile_img: Option<String>,
    display_name: Option<String>,
    alter_number: Option<String>,
    created_on: Option<i64>,
    last_login: Option<i64>,
    active: bool,
    group_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password,
            first_name: row.first_name,
            last_name: row.last_name,
            company: row.company,
            phone: row.phone,
            profile_img: row.profile_img,
            display_name: row.display_name,
            alter_number: row.alter_number,
            created_on: row.created_on,
            last_login: row.last_login,
            active: row.active,
            group_id: row.group_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("finding user by id", e))?;
        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        self.find_one("finding user by username", &sql, &[username]).await
    }

    async fn find_by_username_in_tenant(
        &self,
        username: &str,
        tenant_id: TenantId,
    ) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1 AND group_id = $2", USER_COLUMNS);
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(username)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("finding user in tenant", e))?;
        Ok(row.map(User::from))
    }

    async fn find_by_username_in_company(
        &self,
        username: &str,
        company: &str,
    ) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1 AND company = $2", USER_COLUMNS);
        self.find_one("finding user in company", &sql, &[username, company]).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE LOWER(email) = LOWER($1)", USER_COLUMNS);
        self.find_one("finding user by email", &sql, &[email]).await
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO users (
                username, email, password, first_name, last_name,
                phone, company, display_name, group_id, active, created_on
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let row: UserRow = sqlx::query_as(&sql)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone)
            .bind(&user.company)
            .bind(&user.display_name)
            .bind(user.group_id)
            .bind(user.active)
            .bind(user.created_on)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("creating user", e))?;

        tracing::info!(user_id = row.id, "User created");
        Ok(row.into())
    }

    async fn update_last_login(&self, id: UserId, at: i64) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET last_login = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("updating last login", e))?;
        Ok(())
    }
}
