// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use kanban_api::auth::AuthMode;
use kanban_api::config::{AuthConfig, ServerConfig};
use kanban_api::router::build_app_router;
use kanban_api::state::AppState;

/// Fixed identity every request runs as when tests use the default app.
pub const TEST_USER: &str = "test-user";

/// Build a test `ServerConfig` with safe defaults and auth disabled.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        auth: AuthConfig::Disabled {
            dev_user_id: TEST_USER.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and auth disabled (every request runs as [`TEST_USER`]).
///
/// This goes through the same `build_app_router` that production uses, so
/// tests exercise the identical middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let auth = AuthMode::Disabled {
        dev_user_id: TEST_USER.to_string(),
    };
    build_test_app_with_auth(pool, auth)
}

/// Like [`build_test_app`] but with an explicit [`AuthMode`], for tests
/// that exercise the token verification path.
pub fn build_test_app_with_auth(pool: PgPool, auth: AuthMode) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        auth: Arc::new(auth),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_with_bearer(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw (possibly malformed) body.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = http_body_util::BodyExt::collect(response.into_body())
        .await
        .unwrap()
        .to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
