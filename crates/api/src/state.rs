use std::sync::Arc;

use crate::auth::AuthMode;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kanban_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Resolved authentication mode (dev bypass or JWKS verifier).
    pub auth: Arc<AuthMode>,
}
