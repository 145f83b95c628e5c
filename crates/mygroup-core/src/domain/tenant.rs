//! Tenant domain entity (the `group_create` table)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mygroup_shared::TenantId;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub apps_name: Option<String>,
    pub db_name: Option<String>,
    /// 1 active, 0 disabled.
    pub status: i16,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn is_active(&self) -> bool {
        self.status != 0
    }
}
