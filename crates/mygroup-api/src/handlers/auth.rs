// ============================================================================
// MyGroup API - Auth Handlers
// File: crates/mygroup-api/src/handlers/auth.rs
// ============================================================================
//! Login, registration, refresh and logout handlers
//!
//! The seven login endpoints differ only in their [`LoginKind`] and path
//! parameters; all of them run [`AuthService::login`].
//!
//! [`AuthService::login`]: mygroup_core::services::AuthService::login

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use mygroup_core::domain::{Credentials, LoginKind, LoginScope, RegisterInput};
use mygroup_shared::constants::messages;
use mygroup_shared::{AccessTokenPayload, ApiResponse, AuthPayload};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::middleware::AuthUser;
use crate::state::AppState;

type AuthResult = Result<Json<ApiResponse<AuthPayload>>, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

async fn login(state: &AppState, kind: LoginKind, scope: LoginScope, credentials: Credentials) -> AuthResult {
    let payload = state.auth.login(kind, &scope, &credentials).await?;
    Ok(Json(ApiResponse::success_with_message(payload, messages::LOGIN)))
}

/// POST /auth/admin/login
pub async fn admin_login(State(state): State<AppState>, ApiJson(credentials): ApiJson<Credentials>) -> AuthResult {
    login(&state, LoginKind::Admin, LoginScope::global(), credentials).await
}

/// POST /auth/group-admin/login/{groupName}
pub async fn group_admin_login(
    State(state): State<AppState>,
    Path(group_name): Path<String>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> AuthResult {
    login(&state, LoginKind::GroupAdmin, LoginScope::named(group_name), credentials).await
}

/// POST /auth/company/login/{companyName}
pub async fn company_login(
    State(state): State<AppState>,
    Path(company_name): Path<String>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> AuthResult {
    login(&state, LoginKind::Company, LoginScope::named(company_name), credentials).await
}

/// POST /auth/client/login/{groupName}
pub async fn client_login(
    State(state): State<AppState>,
    Path(group_name): Path<String>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> AuthResult {
    login(&state, LoginKind::Client, LoginScope::named(group_name), credentials).await
}

/// POST /auth/god/login/{groupName}/{subGroup}
pub async fn god_login(
    State(state): State<AppState>,
    Path((group_name, sub_group)): Path<(String, String)>,
    ApiJson(credentials): ApiJson<Credentials>,
) -> AuthResult {
    login(&state, LoginKind::God, LoginScope::with_sub_group(group_name, sub_group), credentials).await
}

/// POST /auth/partner/login
pub async fn partner_login(State(state): State<AppState>, ApiJson(credentials): ApiJson<Credentials>) -> AuthResult {
    login(&state, LoginKind::Partner, LoginScope::global(), credentials).await
}

/// POST /auth/reporter/login
pub async fn reporter_login(State(state): State<AppState>, ApiJson(credentials): ApiJson<Credentials>) -> AuthResult {
    login(&state, LoginKind::Reporter, LoginScope::global(), credentials).await
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), ApiError> {
    let payload = state.auth.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(payload, messages::REGISTER)),
    ))
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<ApiResponse<AccessTokenPayload>>, ApiError> {
    let token = request
        .refresh_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Refresh token is required".into()))?;
    let payload = state.auth.refresh(&token).await?;
    Ok(Json(ApiResponse::success(payload)))
}

/// POST /auth/logout. Tokens are stateless; nothing is revoked.
pub async fn logout(user: AuthUser) -> Json<ApiResponse<()>> {
    info!(user_id = user.id, username = %user.username, "User logged out");
    Json(ApiResponse::message(messages::LOGOUT))
}
