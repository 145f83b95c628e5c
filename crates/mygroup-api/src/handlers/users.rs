//! Profile and tenant routes for authenticated callers

use axum::{
    extract::{Path, State},
    Json,
};

use mygroup_core::domain::Tenant;
use mygroup_core::services::UserWithRoles;
use mygroup_shared::{ApiResponse, UserId};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// GET /users/me
pub async fn me(State(state): State<AppState>, user: AuthUser) -> Result<Json<ApiResponse<UserWithRoles>>, ApiError> {
    let profile = state.users.profile(user.id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// GET /users/{userId}, behind the ownership gate.
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ApiResponse<UserWithRoles>>, ApiError> {
    let id: UserId = user_id
        .parse()
        .map_err(|_| ApiError::Validation("userId must be numeric".into()))?;
    let profile = state.users.profile(id).await?;
    Ok(Json(ApiResponse::success(profile)))
}

/// GET /admin/tenants, administrators only.
pub async fn list_tenants(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Tenant>>>, ApiError> {
    let tenants = state.tenants.list().await?;
    Ok(Json(ApiResponse::success(tenants)))
}
