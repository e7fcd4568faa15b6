//! Unauthenticated service metadata routes: root banner, health, OpenAPI doc.

use std::sync::LazyLock;

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

/// Root banner payload.
#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET / -- service banner, mostly useful as a smoke check.
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "KanbanBoard API is running",
    })
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = kanban_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

static OPENAPI_DOC: LazyLock<Value> = LazyLock::new(|| {
    serde_json::from_str(include_str!("../../openapi.json"))
        .unwrap_or_else(|e| panic!("embedded openapi.json is invalid: {e}"))
});

/// GET /openapi.json -- machine-readable API description.
async fn openapi() -> Json<Value> {
    Json(OPENAPI_DOC.clone())
}

/// Mount metadata routes at the root level, outside the auth boundary.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi))
}
