//! Merging pulled server records into the local workspace.
//!
//! All merges are idempotent by entity id: a record already present
//! anywhere in the workspace is skipped. The pull watermark is a
//! timestamp, not a per-item acknowledgment, so records at the cursor
//! boundary can arrive twice and this is where that gets absorbed.

use kanban_core::model::{Board, Card, Column, Workspace};

use crate::api::{RemoteBoard, RemoteCard, RemoteColumn};

/// Insert a pulled board unless one with the same id already exists.
/// Returns whether anything changed.
pub fn merge_board(workspace: &mut Workspace, remote: &RemoteBoard) -> bool {
    if workspace.boards.iter().any(|b| b.id == remote.id) {
        return false;
    }

    let mut board = Board::new(remote.title.clone(), Vec::new(), workspace.user_id.clone());
    board.id = remote.id;
    board.created_at = remote.created_at;
    board.updated_at = remote.created_at;
    workspace.boards.push(board);
    true
}

/// Insert a pulled column into its board at its (clamped) position.
///
/// Skipped when the parent board is not in the workspace or the column
/// id already exists.
pub fn merge_column(workspace: &mut Workspace, remote: &RemoteColumn) -> bool {
    if workspace
        .boards
        .iter()
        .flat_map(|b| &b.columns)
        .any(|c| c.id == remote.id)
    {
        return false;
    }

    let Some(board) = workspace.board_mut(remote.board_id) else {
        return false;
    };

    let mut column = Column::new(remote.title.clone());
    column.id = remote.id;
    column.created_at = remote.created_at;

    let index = (remote.position.max(0) as usize).min(board.columns.len());
    board.columns.insert(index, column);
    true
}

/// Insert a pulled card into its column at its (clamped) position.
///
/// Skipped when the parent column is not in the workspace or the card
/// id already exists anywhere, including a completed bucket.
pub fn merge_card(workspace: &mut Workspace, remote: &RemoteCard) -> bool {
    if card_exists(workspace, remote.id) {
        return false;
    }

    let Some(column) = workspace
        .boards
        .iter_mut()
        .flat_map(|b| &mut b.columns)
        .find(|c| c.id == remote.column_id)
    else {
        return false;
    };

    let mut card = Card::new(
        remote.id,
        remote.title.clone(),
        remote.description.clone().unwrap_or_default(),
        Vec::new(),
    );
    card.created_at = remote.created_at;
    card.updated_at = remote.created_at;

    let index = (remote.position.max(0) as usize).min(column.cards.len());
    column.cards.insert(index, card);
    true
}

fn card_exists(workspace: &Workspace, id: kanban_core::types::EntityId) -> bool {
    workspace.boards.iter().any(|board| {
        board.completed_cards.iter().any(|c| c.id == id)
            || board
                .columns
                .iter()
                .flat_map(|c| &c.cards)
                .any(|c| c.id == id)
    })
}
