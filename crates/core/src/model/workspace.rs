use serde::{Deserialize, Serialize};

use crate::model::Board;
use crate::types::EntityId;

/// Root container: all boards for one user plus the active-board pointer.
///
/// Invariant: if any board exists, `current_board_id` references one of
/// them. A workspace with zero boards is transient and is healed by the
/// engine before any read (see [`BoardEngine`](crate::engine::BoardEngine)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub boards: Vec<Board>,
    pub current_board_id: Option<EntityId>,
    pub user_id: String,
}

impl Workspace {
    /// A workspace seeded with one default board, which is also current.
    pub fn with_default_board(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let board = Board::default_board(user_id.clone());
        let current = board.id;
        Self {
            boards: vec![board],
            current_board_id: Some(current),
            user_id,
        }
    }

    pub fn board(&self, id: EntityId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id)
    }

    pub fn board_mut(&mut self, id: EntityId) -> Option<&mut Board> {
        self.boards.iter_mut().find(|b| b.id == id)
    }

    /// Repoint `current_board_id` at an existing board if it is missing or
    /// dangling. A zero-board workspace is left for the engine to heal.
    pub fn repair_current_board(&mut self) {
        let valid = self
            .current_board_id
            .is_some_and(|id| self.boards.iter().any(|b| b.id == id));
        if !valid {
            self.current_board_id = self.boards.first().map(|b| b.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_default_board_points_at_it() {
        let ws = Workspace::with_default_board("u1");
        assert_eq!(ws.boards.len(), 1);
        assert_eq!(ws.current_board_id, Some(ws.boards[0].id));
    }

    #[test]
    fn repair_fixes_dangling_pointer() {
        let mut ws = Workspace::with_default_board("u1");
        ws.current_board_id = Some(uuid::Uuid::new_v4());
        ws.repair_current_board();
        assert_eq!(ws.current_board_id, Some(ws.boards[0].id));
    }

    #[test]
    fn round_trips_through_json() {
        let ws = Workspace::with_default_board("u1");
        let json = serde_json::to_string(&ws).unwrap();
        let decoded: Workspace = serde_json::from_str(&json).unwrap();
        assert_eq!(ws, decoded);
    }
}
