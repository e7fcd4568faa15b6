//! Row models and create inputs for the sync store.
//!
//! Records serialize with camelCase names and RFC 3339 timestamps -- the
//! wire shape shared with the sync client. Inputs deserialize from request
//! bodies; `position` is caller-supplied and never renumbered server-side.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use kanban_core::types::{EntityId, Timestamp};

/// A row from the `boards` table (user scoping column omitted from the wire).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRecord {
    pub id: EntityId,
    pub title: String,
    pub created_at: Timestamp,
}

/// A row from the `columns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRecord {
    pub id: EntityId,
    pub board_id: EntityId,
    pub title: String,
    pub position: i32,
    pub created_at: Timestamp,
}

/// A row from the `cards` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: EntityId,
    pub column_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardInput {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInput {
    pub board_id: EntityId,
    pub title: String,
    pub position: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub column_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub position: i32,
}
