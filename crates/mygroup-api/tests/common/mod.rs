//! In-memory repositories and request helpers for router tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use mygroup_api::{create_app, AppState};
use mygroup_core::domain::{Group, NewUser, Role, Tenant, User};
use mygroup_core::repositories::{RoleRepository, TenantRepository, UserRepository};
use mygroup_core::DomainError;
use mygroup_security::jwt::TokenSubject;
use mygroup_security::{PasswordService, TokenService};
use mygroup_shared::config::{AppConfig, JwtSettings};
use mygroup_shared::{TenantId, UserId};

pub const PASSWORD: &str = "correct-horse-battery";

#[derive(Default)]
pub struct Store {
    users: Mutex<Vec<User>>,
    tenants: Mutex<Vec<Tenant>>,
    groups: Mutex<Vec<Group>>,
    memberships: Mutex<Vec<(UserId, i64)>>,
}

impl Store {
    pub fn seeded() -> Arc<Self> {
        let store = Store::default();
        {
            let mut groups = store.groups.lock().unwrap();
            for (i, role) in Role::ALL.iter().enumerate() {
                groups.push(Group {
                    id: i as i64 + 1,
                    name: role.as_str().to_string(),
                    description: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                });
            }
        }
        Arc::new(store)
    }

    pub fn add_tenant(&self, name: &str, status: i16) -> TenantId {
        let mut tenants = self.tenants.lock().unwrap();
        let id = tenants.len() as i64 + 1;
        tenants.push(Tenant {
            id,
            name: name.to_string(),
            apps_name: None,
            db_name: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn add_user(&self, spec: UserSpec<'_>) -> User {
        let hash = PasswordService::new(&test_config().security).hash(PASSWORD).unwrap();
        let user = {
            let mut users = self.users.lock().unwrap();
            let now = Utc::now();
            let user = User {
                id: users.len() as i64 + 1,
                username: spec.username.to_string(),
                email: format!("{}@example.com", spec.username),
                password_hash: hash,
                first_name: None,
                last_name: None,
                company: spec.company.map(str::to_string),
                phone: None,
                profile_img: None,
                display_name: None,
                alter_number: None,
                created_on: Some(now.timestamp()),
                last_login: None,
                active: spec.active,
                group_id: spec.tenant,
                created_at: now,
                updated_at: now,
            };
            users.push(user.clone());
            user
        };
        for role in spec.roles {
            let group_id = self.group_id(role).unwrap();
            self.memberships.lock().unwrap().push((user.id, group_id));
        }
        user
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }

    fn group_id(&self, name: &str) -> Option<i64> {
        self.groups.lock().unwrap().iter().find(|g| g.name == name).map(|g| g.id)
    }
}

pub struct UserSpec<'a> {
    pub username: &'a str,
    pub roles: &'a [&'a str],
    pub tenant: Option<TenantId>,
    pub company: Option<&'a str>,
    pub active: bool,
}

impl<'a> UserSpec<'a> {
    pub fn new(username: &'a str, roles: &'a [&'a str]) -> Self {
        Self {
            username,
            roles,
            tenant: None,
            company: None,
            active: true,
        }
    }

    pub fn in_tenant(mut self, tenant: TenantId) -> Self {
        self.tenant = Some(tenant);
        self
    }

    pub fn in_company(mut self, company: &'a str) -> Self {
        self.company = Some(company);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

#[async_trait]
impl UserRepository for Store {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.user(id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_username_in_tenant(
        &self,
        username: &str,
        tenant_id: TenantId,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username && u.group_id == Some(tenant_id))
            .cloned())
    }

    async fn find_by_username_in_company(
        &self,
        username: &str,
        company: &str,
    ) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username && u.company.as_deref() == Some(company))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == new_user.username) {
            return Err(DomainError::DuplicateEntry { field: "username".into() });
        }
        let now = Utc::now();
        let user = User {
            id: users.len() as i64 + 1,
            username: new_user.username.clone(),
            email: new_user.email.clone(),
            password_hash: new_user.password_hash.clone(),
            first_name: new_user.first_name.clone(),
            last_name: new_user.last_name.clone(),
            company: new_user.company.clone(),
            phone: new_user.phone.clone(),
            profile_img: None,
            display_name: new_user.display_name.clone(),
            alter_number: None,
            created_on: Some(new_user.created_on),
            last_login: None,
            active: new_user.active,
            group_id: new_user.group_id,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_last_login(&self, id: UserId, at: i64) -> Result<(), DomainError> {
        if let Some(user) = self.users.lock().unwrap().iter_mut().find(|u| u.id == id) {
            user.record_login(at);
        }
        Ok(())
    }
}

#[async_trait]
impl TenantRepository for Store {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tenants.lock().unwrap().iter().find(|t| t.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Tenant>, DomainError> {
        Ok(self.tenants.lock().unwrap().clone())
    }
}

#[async_trait]
impl RoleRepository for Store {
    async fn find_by_name(&self, name: &str) -> Result<Option<Group>, DomainError> {
        Ok(self.groups.lock().unwrap().iter().find(|g| g.name == name).cloned())
    }

    async fn roles_for_user(&self, user_id: UserId) -> Result<Vec<String>, DomainError> {
        let memberships = self.memberships.lock().unwrap();
        let groups = self.groups.lock().unwrap();
        Ok(memberships
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .filter_map(|(_, gid)| groups.iter().find(|g| g.id == *gid))
            .map(|g| g.name.clone())
            .collect())
    }

    async fn assign_role(&self, user_id: UserId, group_id: i64) -> Result<(), DomainError> {
        let mut memberships = self.memberships.lock().unwrap();
        if !memberships.contains(&(user_id, group_id)) {
            memberships.push((user_id, group_id));
        }
        Ok(())
    }
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.security.bcrypt_cost = 4;
    config
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<Store>,
    pub config: AppConfig,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Store::seeded();
        let state = AppState::new(config.clone(), store.clone(), store.clone(), store.clone());
        Self {
            router: create_app(state),
            store,
            config,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value, axum::http::HeaderMap) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body, headers)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, body, _) = self.send(request).await;
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let (status, body, _) = self.send(builder.body(Body::empty()).unwrap()).await;
        (status, body)
    }

    /// Access token carrying the user's stored roles.
    pub async fn access_token_for(&self, user: &User) -> String {
        let roles = self.store.roles_for_user(user.id).await.unwrap();
        TokenService::new(&self.config.jwt)
            .generate_access_token(subject(user), &roles)
            .unwrap()
    }

    pub fn refresh_token_for(&self, user: &User) -> String {
        TokenService::new(&self.config.jwt).generate_refresh_token(subject(user)).unwrap()
    }

    /// Tokens signed with this app's secret that expired an hour ago.
    pub fn expired_tokens_for(&self, user: &User) -> (String, String) {
        let tokens = TokenService::new(&JwtSettings {
            access_token_expiry: -3600,
            refresh_token_expiry: -3600,
            ..self.config.jwt.clone()
        });
        (
            tokens.generate_access_token(subject(user), &[]).unwrap(),
            tokens.generate_refresh_token(subject(user)).unwrap(),
        )
    }
}

fn subject(user: &User) -> TokenSubject<'_> {
    TokenSubject {
        id: user.id,
        username: &user.username,
        email: &user.email,
        group_id: user.group_id,
    }
}

pub fn credentials(username: &str, password: &str) -> Value {
    serde_json::json!({ "username": username, "password": password })
}
