// ============================================================================
// MyGroup API - Authentication Middleware
// File: crates/mygroup-api/src/middleware/auth.rs
// ============================================================================
//! Bearer token verification and the authenticated caller extractor

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::debug;

use mygroup_core::DomainError;
use mygroup_security::TokenClaims;
use mygroup_shared::{TenantId, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Identity decoded from a verified access token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub group_id: Option<TenantId>,
}

impl From<TokenClaims> for AuthUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            id: claims.id,
            username: claims.username,
            email: claims.email,
            roles: claims.roles,
            group_id: claims.group_id,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Rejects requests without a valid access token and attaches [`AuthUser`].
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or_else(|| ApiError::Unauthorized("No token provided".into()))?;

    let claims = state.auth.verify_access_token(token).map_err(|e| match e {
        DomainError::TokenExpired => ApiError::TokenExpired,
        _ => ApiError::InvalidToken("Invalid token".into()),
    })?;

    debug!(user_id = claims.id, "Request authenticated");
    req.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(req).await)
}
