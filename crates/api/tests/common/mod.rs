#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use nodeloom_api::auth::jwt::{generate_access_token, JwtConfig};
use nodeloom_api::config::{RunMode, ServerConfig, StoreConfig};
use nodeloom_api::router::build_app_router;
use nodeloom_api::state::AppState;
use nodeloom_db::memory::MemoryStore;
use tower::ServiceExt;

pub const CORS_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        run_mode: RunMode::Test,
        store: StoreConfig {
            url: "http://remote-store.invalid".to_string(),
            key: "test-key".to_string(),
        },
        cors_origins: vec![CORS_ORIGIN.to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_hours: 24,
        },
    }
}

/// Build the full application router over an in-memory store.
///
/// Same middleware stack as production: CORS, request ID, timeout,
/// tracing, panic recovery.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_app_router(AppState::new(store, test_config()))
}

/// A token accepted by the test app for an arbitrary caller.
pub fn token_for(user_id: &str, username: &str) -> String {
    generate_access_token(user_id, username, &test_config().jwt)
        .expect("token generation should succeed")
}

pub fn test_token() -> String {
    token_for("00000000-0000-4000-8000-000000000001", "tester")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<String>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(raw) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(raw)
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body.to_string())).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body.to_string())).await
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw(app: Router, uri: &str, raw: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(raw.to_string())).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body.to_string())).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
