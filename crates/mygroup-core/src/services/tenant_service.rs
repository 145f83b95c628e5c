//! Tenant listing for administrators

use std::sync::Arc;

use crate::domain::Tenant;
use crate::error::DomainError;
use crate::repositories::TenantRepository;

pub struct TenantService {
    tenants: Arc<dyn TenantRepository>,
}

impl TenantService {
    pub fn new(tenants: Arc<dyn TenantRepository>) -> Self {
        Self { tenants }
    }

    pub async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        self.tenants.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockTenantRepository;

    #[tokio::test]
    async fn test_list_passes_through_errors() {
        let mut tenants = MockTenantRepository::new();
        tenants
            .expect_list()
            .returning(|| Err(DomainError::DatabaseError("down".into())));
        let service = TenantService::new(Arc::new(tenants));
        assert!(matches!(service.list().await, Err(DomainError::DatabaseError(_))));
    }
}
