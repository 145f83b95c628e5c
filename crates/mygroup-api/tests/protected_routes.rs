mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;

use common::{test_config, TestApp, UserSpec};

#[tokio::test]
async fn test_me_returns_profile_and_roles() {
    let app = TestApp::new();
    let user = app.store.add_user(UserSpec::new("asha", &["reporter"]));
    let token = app.access_token_for(&user).await;

    let (status, body) = app.get("/api/users/me", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "asha");
    assert_eq!(body["data"]["roles"], json!(["reporter"]));
}

#[tokio::test]
async fn test_missing_or_malformed_authorization() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");

    let request = Request::builder()
        .uri("/api/users/me")
        .header("authorization", "Basic YXNoYTpwdw==")
        .body(Body::empty())
        .unwrap();
    let (status, body, _) = app.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_expired_and_invalid_access_tokens() {
    let app = TestApp::new();
    let user = app.store.add_user(UserSpec::new("asha", &["admin"]));

    let (expired_access, _) = app.expired_tokens_for(&user);
    let (status, body) = app.get("/api/users/me", Some(&expired_access)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "TOKEN_EXPIRED");

    let (status, body) = app.get("/api/users/me", Some("not.a.token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");

    // A refresh token is not accepted as a bearer credential.
    let refresh = app.refresh_token_for(&user);
    let (status, body) = app.get("/api/users/me", Some(&refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_ownership_gate() {
    let app = TestApp::new();
    let owner = app.store.add_user(UserSpec::new("owner", &["client"]));
    let other = app.store.add_user(UserSpec::new("other", &["client"]));
    let admin = app.store.add_user(UserSpec::new("root", &["groups"]));

    let owner_token = app.access_token_for(&owner).await;
    let (status, body) = app.get(&format!("/api/users/{}", owner.id), Some(&owner_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["id"], owner.id);

    let (status, body) = app.get(&format!("/api/users/{}", other.id), Some(&owner_token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let admin_token = app.access_token_for(&admin).await;
    let (status, body) = app.get(&format!("/api/users/{}", other.id), Some(&admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "other");

    let (status, body) = app.get("/api/users/999", Some(&admin_token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_admin_role_gate() {
    let app = TestApp::new();
    app.store.add_tenant("temple", 1);
    let admin = app.store.add_user(UserSpec::new("root", &["admin"]));
    let client = app.store.add_user(UserSpec::new("carl", &["client"]));

    let (status, body) = app.get("/api/admin/tenants", Some(&app.access_token_for(&admin).await)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "temple");

    let (status, body) = app.get("/api/admin/tenants", Some(&app.access_token_for(&client).await)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");

    let (status, _) = app.get("/api/admin/tenants", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_and_root_banner() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "API is running");
    assert!(body["timestamp"].is_string());

    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "MyGroup API Server");
    assert_eq!(body["documentation"], "/api/health");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Route not found: /api/does-not-exist");
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let app = TestApp::new();
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();

    let (_, _, headers) = app.send(request).await;

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["referrer-policy"], "no-referrer");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_error_stack_only_outside_production() {
    let app = TestApp::new();
    let (_, body) = app.get("/api/users/me", None).await;
    assert!(body["stack"].is_string());

    let mut config = test_config();
    config.app.env = "production".into();
    let app = TestApp::with_config(config);
    let (status, body) = app.get("/api/users/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.get("stack").is_none());
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = test_config();
    config.app.body_limit_bytes = 64;
    let app = TestApp::with_config(config);

    let padding = "x".repeat(256);
    let (status, body) = app
        .post_json("/api/auth/admin/login", json!({ "username": padding, "password": "pw" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FILE_TOO_LARGE");
}

#[tokio::test]
async fn test_owner_id_compared_as_number() {
    let app = TestApp::new();
    let owner = app.store.add_user(UserSpec::new("owner", &["client"]));
    let token = app.access_token_for(&owner).await;

    let (status, body) = app.get(&format!("/api/users/0{}", owner.id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["id"], owner.id);

    let (status, body) = app.get("/api/users/abc", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_configured_origin_is_allowed_with_credentials() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/api/health")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();

    let (_, _, headers) = app.send(request).await;

    assert_eq!(headers["access-control-allow-origin"], "http://localhost:5173");
    assert_eq!(headers["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn test_wildcard_origin_mirrors_request_origin() {
    let mut config = test_config();
    config.app.cors_origin = "*".into();
    let app = TestApp::with_config(config);
    let request = Request::builder()
        .uri("/api/health")
        .header("origin", "https://portal.example.com")
        .body(Body::empty())
        .unwrap();

    let (status, _, headers) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["access-control-allow-origin"], "https://portal.example.com");
    assert_eq!(headers["access-control-allow-credentials"], "true");
}
