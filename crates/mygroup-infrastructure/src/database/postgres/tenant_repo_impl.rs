// ============================================================================
// MyGroup Infrastructure - PostgreSQL Tenant Repository
// File: crates/mygroup-infrastructure/src/database/postgres/tenant_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mygroup_core::domain::Tenant;
use mygroup_core::error::DomainError;
use mygroup_core::repositories::TenantRepository;

use crate::database::error::map_sqlx_error;

pub struct PgTenantRepository {
    pool: PgPool,
}

impl PgTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TenantRow {
    id: i64,
    name: String,
    apps_name: Option<String>,
    db_name: Option<String>,
    status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            apps_name: row.apps_name,
            db_name: row.db_name,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TenantRepository for PgTenantRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tenant>, DomainError> {
        let row: Option<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, apps_name, db_name, status, created_at, updated_at
            FROM group_create
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("finding tenant by name", e))?;

        Ok(row.map(Tenant::from))
    }

    async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        let rows: Vec<TenantRow> = sqlx::query_as(
            r#"
            SELECT id, name, apps_name, db_name, status, created_at, updated_at
            FROM group_create
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("listing tenants", e))?;

        Ok(rows.into_iter().map(Tenant::from).collect())
    }
}
