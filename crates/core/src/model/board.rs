use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Card, Column};
use crate::types::{EntityId, Timestamp};

/// Access granted by a board share. Enforcement is a caller responsibility;
/// the share record itself is pure data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    View,
    Edit,
}

/// A share record on a board, unique by `user_id`. Re-sharing with the same
/// user replaces the prior record (last write wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardShare {
    pub user_id: String,
    pub user_name: String,
    pub access_level: AccessLevel,
    pub shared_at: Timestamp,
}

/// A named collection of columns plus a terminal `completed_cards` bucket.
///
/// `updated_at` advances on every mutation to the board or anything nested
/// inside it and is always >= `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: EntityId,
    pub name: String,
    pub columns: Vec<Column>,
    pub completed_cards: Vec<Card>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub shared_with: Vec<BoardShare>,
    pub owner_id: String,
}

/// Default columns seeded on every new board.
pub(crate) const DEFAULT_COLUMN_TITLES: [&str; 2] = ["To Do", "In Progress"];

impl Board {
    pub fn new(name: impl Into<String>, columns: Vec<Column>, owner_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            columns,
            completed_cards: Vec::new(),
            created_at: now,
            updated_at: now,
            shared_with: Vec::new(),
            owner_id: owner_id.into(),
        }
    }

    /// The board synthesized when a workspace has nothing to show:
    /// "My Board" with the two default columns.
    pub fn default_board(owner_id: impl Into<String>) -> Self {
        let columns = DEFAULT_COLUMN_TITLES.iter().copied().map(Column::new).collect();
        Self::new("My Board", columns, owner_id)
    }

    /// Refresh `updated_at`, keeping the `updated_at >= created_at` invariant.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Decode-side representation tolerating the pre-multi-board layout, which
/// lacked `id`, `name`, `sharedWith`, and `ownerId`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoardRepr {
    #[serde(default = "Uuid::new_v4")]
    id: EntityId,
    #[serde(default = "default_board_name")]
    name: String,
    columns: Vec<Column>,
    #[serde(default)]
    completed_cards: Vec<Card>,
    created_at: Timestamp,
    updated_at: Timestamp,
    #[serde(default)]
    shared_with: Vec<BoardShare>,
    #[serde(default)]
    owner_id: String,
}

fn default_board_name() -> String {
    "My Board".to_string()
}

impl From<BoardRepr> for Board {
    fn from(repr: BoardRepr) -> Self {
        Self {
            id: repr.id,
            name: repr.name,
            columns: repr.columns,
            completed_cards: repr.completed_cards,
            created_at: repr.created_at,
            updated_at: repr.updated_at,
            shared_with: repr.shared_with,
            owner_id: repr.owner_id,
        }
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        BoardRepr::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_json() {
        let mut board = Board::default_board("owner-1");
        board.shared_with.push(BoardShare {
            user_id: "u2".into(),
            user_name: "Sam".into(),
            access_level: AccessLevel::Edit,
            shared_at: Utc::now(),
        });

        let json = serde_json::to_string(&board).unwrap();
        let decoded: Board = serde_json::from_str(&json).unwrap();

        assert_eq!(board, decoded);
    }

    #[test]
    fn decodes_legacy_board_without_identity_fields() {
        let json = r#"{
            "columns": [],
            "completedCards": [],
            "createdAt": "2023-06-01T10:00:00Z",
            "updatedAt": "2023-06-02T10:00:00Z"
        }"#;

        let board: Board = serde_json::from_str(json).unwrap();
        assert_eq!(board.name, "My Board");
        assert!(board.shared_with.is_empty());
        assert_eq!(board.owner_id, "");
    }

    #[test]
    fn default_board_seeds_the_two_default_columns() {
        let board = Board::default_board("owner-1");
        assert_eq!(board.name, "My Board");
        let titles: Vec<_> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["To Do", "In Progress"]);
        assert!(board.columns.iter().all(|c| c.cards.is_empty()));
    }

    #[test]
    fn access_level_uses_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&AccessLevel::View).unwrap(), "\"view\"");
        assert_eq!(serde_json::to_string(&AccessLevel::Edit).unwrap(), "\"edit\"");
    }
}
