use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    success: bool,
    message: String,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    success: bool,
    message: String,
    version: String,
    documentation: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "API is running".to_string(),
        timestamp: Utc::now(),
    })
}

pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let app = &state.config.app;
    Json(RootResponse {
        success: true,
        message: app.name.clone(),
        version: app.version.clone(),
        documentation: format!("{}/health", app.api_prefix.trim_end_matches('/')),
    })
}
