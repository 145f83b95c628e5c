//! Shared application state

use std::sync::Arc;

use mygroup_core::repositories::{RoleRepository, TenantRepository, UserRepository};
use mygroup_core::services::{AuthService, TenantService, UserService};
use mygroup_security::{PasswordService, TokenService};
use mygroup_shared::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub users: Arc<UserService>,
    pub tenants: Arc<TenantService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        tenants: Arc<dyn TenantRepository>,
        roles: Arc<dyn RoleRepository>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(&config.jwt));
        let passwords = PasswordService::new(&config.security);

        let auth = AuthService::new(
            users.clone(),
            tenants.clone(),
            roles.clone(),
            tokens,
            passwords,
            config.auth.clone(),
        );

        Self {
            auth: Arc::new(auth),
            users: Arc::new(UserService::new(users, roles)),
            tenants: Arc::new(TenantService::new(tenants)),
            config: Arc::new(config),
        }
    }
}
