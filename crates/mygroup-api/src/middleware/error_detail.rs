//! Adds the `stack` diagnostic to error bodies outside production

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use mygroup_shared::config::AppConfig;

use crate::error::ErrorDetail;

pub async fn expose_error_detail(State(config): State<Arc<AppConfig>>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if config.is_production() {
        return response;
    }
    let Some(detail) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let mut body = detail.body;
    body.stack = Some(detail.stack);
    let Ok(bytes) = serde_json::to_vec(&body) else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
