//! Router assembly and the HTTP layer stack

use std::any::Any;

use axum::{
    extract::{DefaultBodyLimit, OriginalUri},
    http::{header, HeaderValue, Method},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{error, warn, Level};

use crate::error::ApiError;
use crate::handlers::{auth, health, users};
use crate::middleware::{authenticate, expose_error_detail, require_owner, require_roles, OwnerGate, RoleGate};
use crate::state::AppState;

/// Builds the complete application router.
pub fn create_app(state: AppState) -> Router {
    let prefix = state.config.app.api_prefix.trim_end_matches('/').to_string();
    let api = api_routes(state.clone());

    let router = Router::new().route("/", get(health::root));
    let router = if prefix.is_empty() {
        router.merge(api)
    } else {
        router.nest(&prefix, api)
    };

    router
        .fallback(route_not_found)
        .with_state(state.clone())
        .layer(DefaultBodyLimit::max(state.config.app.body_limit_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.config.clone(), expose_error_detail))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors_layer(&state.config.app.cors_origin))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn api_routes(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/admin/login", post(auth::admin_login))
        .route("/auth/group-admin/login/{groupName}", post(auth::group_admin_login))
        .route("/auth/company/login/{companyName}", post(auth::company_login))
        .route("/auth/client/login/{groupName}", post(auth::client_login))
        .route("/auth/god/login/{groupName}/{subGroup}", post(auth::god_login))
        .route("/auth/partner/login", post(auth::partner_login))
        .route("/auth/reporter/login", post(auth::reporter_login))
        .route("/auth/register", post(auth::register))
        .route("/auth/refresh", post(auth::refresh));

    let protected = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/users/me", get(users::me))
        .route(
            "/users/{userId}",
            get(users::get_user).route_layer(middleware::from_fn_with_state(
                OwnerGate { param: "userId" },
                require_owner,
            )),
        )
        .route(
            "/admin/tenants",
            get(users::list_tenants).route_layer(middleware::from_fn_with_state(RoleGate::ADMIN, require_roles)),
        )
        .route_layer(middleware::from_fn_with_state(state, authenticate));

    public.merge(protected)
}

fn cors_layer(origin: &str) -> CorsLayer {
    // A literal `*` cannot be combined with credentials.
    if origin.trim() == "*" {
        warn!("CORS origin '*' mirrors the request origin");
        return base_cors().allow_origin(AllowOrigin::mirror_request());
    }
    let allow_origin = match HeaderValue::from_str(origin) {
        Ok(value) => AllowOrigin::exact(value),
        Err(_) => {
            warn!(origin = %origin, "Invalid CORS origin, cross-origin requests disabled");
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };
    base_cors().allow_origin(allow_origin)
}

fn base_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn route_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::NotFound(format!("Route not found: {}", uri.path()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Request handler panicked");
    ApiError::Internal(detail).into_response()
}
