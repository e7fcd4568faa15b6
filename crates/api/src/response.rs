//! Shared response envelope types for API handlers.
//!
//! List-shaped responses use an `{ "items": ... }` envelope. Use
//! [`ItemsResponse`] instead of ad-hoc `serde_json::json!({ "items": ... })`
//! to get compile-time type safety and consistent serialization.
//! Single-entity responses are the bare record, no envelope.

use serde::Serialize;

/// Standard `{ "items": [T] }` response envelope.
#[derive(Debug, Serialize)]
pub struct ItemsResponse<T: Serialize> {
    pub items: Vec<T>,
}
