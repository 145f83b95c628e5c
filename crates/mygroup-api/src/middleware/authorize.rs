//! Role and ownership gates, applied after [`authenticate`](super::authenticate)

use axum::{
    extract::{RawPathParams, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use mygroup_core::domain::{has_any_role, Role};
use mygroup_shared::UserId;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Allow-list of roles for a route.
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    pub allowed: &'static [Role],
}

impl RoleGate {
    pub const ADMIN: RoleGate = RoleGate { allowed: Role::ADMINISTRATORS };
    pub const CORPORATE: RoleGate = RoleGate { allowed: Role::CORPORATE };
    pub const CLIENT: RoleGate = RoleGate { allowed: Role::CLIENTS };
    pub const PARTNER: RoleGate = RoleGate { allowed: Role::PARTNERS };
    pub const REPORTER: RoleGate = RoleGate { allowed: Role::REPORTERS };

    pub fn check(&self, user: &AuthUser) -> Result<(), ApiError> {
        if has_any_role(&user.roles, self.allowed) {
            return Ok(());
        }
        warn!(user_id = user.id, roles = ?user.roles, "Access denied: insufficient role");
        Err(ApiError::Forbidden("Access denied. Insufficient permissions.".into()))
    }
}

pub async fn require_roles(State(gate): State<RoleGate>, req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;
    gate.check(user)?;
    Ok(next.run(req).await)
}

/// Names the path parameter that holds the owning user's id.
#[derive(Debug, Clone, Copy)]
pub struct OwnerGate {
    pub param: &'static str,
}

/// Owners and administrators pass. An absent or non-numeric owner id
/// passes; the handler rejects the latter.
pub fn ensure_owner(user: &AuthUser, owner_id: Option<&str>) -> Result<(), ApiError> {
    let Some(owner_id) = owner_id else {
        return Ok(());
    };
    let Ok(owner) = owner_id.parse::<UserId>() else {
        return Ok(());
    };
    if owner == user.id || has_any_role(&user.roles, Role::ADMINISTRATORS) {
        return Ok(());
    }
    warn!(user_id = user.id, owner_id = %owner_id, "Access denied: not the resource owner");
    Err(ApiError::Forbidden("Access denied. You can only access your own resources.".into()))
}

pub async fn require_owner(
    State(gate): State<OwnerGate>,
    params: RawPathParams,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;
    let owner_id = params
        .iter()
        .find(|(name, _)| *name == gate.param)
        .map(|(_, value)| value);
    ensure_owner(user, owner_id)?;
    Ok(next.run(req).await)
}
