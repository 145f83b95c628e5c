// ============================================================================
// MyGroup Core - Authentication Service
// File: crates/mygroup-core/src/services/auth_service.rs
// ============================================================================
//! Role-dispatched login, registration and token refresh

use std::sync::Arc;

use tracing::{error, info, warn};
use validator::Validate;

use mygroup_security::jwt::TokenSubject;
use mygroup_security::{PasswordError, PasswordService, TokenClaims, TokenService};
use mygroup_shared::config::AuthSettings;
use mygroup_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use mygroup_shared::utils::{epoch_seconds, mask_email};
use mygroup_shared::{AccessTokenPayload, AuthPayload, TenantId};

use crate::domain::{
    dashboard_route_for, Credentials, LoginKind, LoginScope, NewUser, RegisterInput, TenantScope, User,
};
use crate::error::DomainError;
use crate::repositories::{RoleRepository, TenantRepository, UserRepository};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tenants: Arc<dyn TenantRepository>,
    roles: Arc<dyn RoleRepository>,
    tokens: Arc<TokenService>,
    passwords: PasswordService,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tenants: Arc<dyn TenantRepository>,
        roles: Arc<dyn RoleRepository>,
        tokens: Arc<TokenService>,
        passwords: PasswordService,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            tenants,
            roles,
            tokens,
            passwords,
            settings,
        }
    }

    /// Single login flow shared by every login endpoint. The profile of
    /// `kind` decides how the user is looked up and which roles may pass.
    pub async fn login(
        &self,
        kind: LoginKind,
        scope: &LoginScope,
        credentials: &Credentials,
    ) -> Result<AuthPayload, DomainError> {
        let (username, password) = credentials
            .parts()
            .ok_or_else(|| DomainError::ValidationError("Username and password are required".into()))?;
        let profile = kind.profile();

        info!(login = %kind, username = %username, "Login attempt");
        if let Some(sub_group) = &scope.sub_group {
            info!(login = %kind, sub_group = %sub_group, "Sub-group login");
        }

        let user = match profile.scope {
            TenantScope::Global => self.users.find_by_username(username).await?,
            TenantScope::TenantByName => {
                let tenant_id = self.resolve_tenant(scope).await?;
                self.users.find_by_username_in_tenant(username, tenant_id).await?
            }
            TenantScope::Company => {
                let company = scope_name(scope)?;
                self.users.find_by_username_in_company(username, company).await?
            }
        };
        let user = user.ok_or_else(|| {
            warn!(login = %kind, username = %username, "Login failed: user not found");
            DomainError::InvalidCredentials
        })?;

        if !user.can_login() {
            warn!(login = %kind, user_id = user.id, "Login failed: account inactive");
            return Err(DomainError::UserNotActive);
        }

        let valid = match PasswordService::verify_blocking(password.to_string(), user.password_hash.clone()).await {
            Ok(valid) => valid,
            Err(PasswordError::UnsupportedHash) => {
                warn!(user_id = user.id, "Stored password hash has an unknown format");
                false
            }
            Err(e) => return Err(e.into()),
        };
        if !valid {
            warn!(login = %kind, user_id = user.id, "Login failed: wrong password");
            return Err(DomainError::InvalidCredentials);
        }

        let roles = self.roles.roles_for_user(user.id).await?;
        if !profile.admits(&roles) {
            warn!(login = %kind, user_id = user.id, roles = ?roles, "Login failed: role not allowed");
            return Err(DomainError::Forbidden(profile.denied_message.to_string()));
        }

        let payload = self.issue_auth_payload(user, roles).await?;
        info!(login = %kind, user_id = payload.user.id, "Login successful");
        Ok(payload)
    }

    pub async fn register(&self, input: RegisterInput) -> Result<AuthPayload, DomainError> {
        let input = input.normalized();
        if !input.has_required_fields() {
            return Err(DomainError::ValidationError(
                "Username, email and password are required".into(),
            ));
        }
        input.validate()?;

        let role = input
            .role
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(self.settings.default_role.as_str())
            .to_string();
        if !self.settings.registrable_roles.iter().any(|r| *r == role) {
            warn!(role = %role, "Registration refused: role not registrable");
            return Err(DomainError::Forbidden(format!("Role '{}' cannot be self-assigned", role)));
        }

        info!(email = %mask_email(&input.email), "Registration attempt");

        if self.users.find_by_username(&input.username).await?.is_some() {
            warn!(username = %input.username, "Registration failed: username taken");
            return Err(DomainError::DuplicateEntry { field: "username".into() });
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            warn!(email = %mask_email(&input.email), "Registration failed: email taken");
            return Err(DomainError::DuplicateEntry { field: "email".into() });
        }

        let password_hash = self.passwords.hash_blocking(input.password.clone()).await?;
        let new_user = NewUser::from_registration(&input, password_hash, epoch_seconds());
        let user = self.users.create(&new_user).await?;

        match self.roles.find_by_name(&role).await? {
            Some(group) => self.roles.assign_role(user.id, group.id).await?,
            None => warn!(role = %role, "Requested role does not exist, user created without it"),
        }
        let roles = self.roles.roles_for_user(user.id).await?;

        let payload = self.issue_auth_payload(user, roles).await?;
        info!(user_id = payload.user.id, "Registration successful");
        Ok(payload)
    }

    /// Exchanges a refresh token for a new access token carrying the
    /// user's current roles.
    pub async fn refresh(&self, refresh_token: &str) -> Result<AccessTokenPayload, DomainError> {
        if refresh_token.trim().is_empty() {
            return Err(DomainError::ValidationError("Refresh token is required".into()));
        }
        let claims = self.tokens.verify_typed(refresh_token, TOKEN_TYPE_REFRESH)?;

        let user = self
            .users
            .find_by_id(claims.id)
            .await?
            .ok_or(DomainError::UserNotFound)?;
        if !user.can_login() {
            return Err(DomainError::UserNotActive);
        }

        let roles = self.roles.roles_for_user(user.id).await?;
        let access_token = self.tokens.generate_access_token(subject(&user), &roles)?;
        Ok(AccessTokenPayload { access_token })
    }

    /// Verifies a bearer token; only access tokens are accepted.
    pub fn verify_access_token(&self, token: &str) -> Result<TokenClaims, DomainError> {
        Ok(self.tokens.verify_typed(token, TOKEN_TYPE_ACCESS)?)
    }

    async fn resolve_tenant(&self, scope: &LoginScope) -> Result<TenantId, DomainError> {
        let name = scope_name(scope)?;
        match self.tenants.find_by_name(name).await? {
            Some(tenant) if tenant.is_active() => Ok(tenant.id),
            Some(_) => {
                warn!(tenant = %name, "Login refused: tenant disabled");
                Err(DomainError::TenantNotFound)
            }
            None => Err(DomainError::TenantNotFound),
        }
    }

    async fn issue_auth_payload(&self, mut user: User, roles: Vec<String>) -> Result<AuthPayload, DomainError> {
        let access_token = self.tokens.generate_access_token(subject(&user), &roles)?;
        let refresh_token = self.tokens.generate_refresh_token(subject(&user))?;

        let now = epoch_seconds();
        if let Err(e) = self.users.update_last_login(user.id, now).await {
            error!(user_id = user.id, "Failed to update last login: {}", e);
        }
        user.record_login(now);

        Ok(AuthPayload {
            user: user.profile(),
            access_token,
            refresh_token,
            dashboard_route: dashboard_route_for(&roles).to_string(),
            roles,
        })
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

fn scope_name(scope: &LoginScope) -> Result<&str, DomainError> {
    scope
        .name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .ok_or(DomainError::TenantNotFound)
}
