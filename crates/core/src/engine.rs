//! The mutation engine: single authority for all workspace state
//! transitions.
//!
//! Every operation is synchronous and total -- it either applies fully or
//! leaves the workspace untouched. Lookups that fail to resolve are silent
//! no-ops by contract: the caller is trusted to supply valid ids, and
//! callers needing feedback check state before/after. The two exceptions
//! are the explicit accessors [`BoardEngine::current_board`] (documented
//! fallback order) and [`BoardEngine::replace_board`] (returns `false` on
//! an unknown id).
//!
//! Each successful transition ends with a persist request against the
//! injected [`WorkspaceStore`]; persist failure is logged and never rolls
//! back the in-memory change.

use uuid::Uuid;

use crate::attachments::AttachmentStore;
use crate::history;
use crate::model::{AccessLevel, Board, BoardShare, Card, Column, Workspace};
use crate::store::WorkspaceStore;
use crate::types::EntityId;

pub struct BoardEngine<S: WorkspaceStore, A: AttachmentStore> {
    workspace: Workspace,
    store: S,
    attachments: A,
}

impl<S: WorkspaceStore, A: AttachmentStore> BoardEngine<S, A> {
    pub fn new(workspace: Workspace, store: S, attachments: A) -> Self {
        Self {
            workspace,
            store,
            attachments,
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn into_workspace(self) -> Workspace {
        self.workspace
    }

    /// Fire the persist side effect. Durability is best-effort; the
    /// in-memory workspace stays authoritative for the session.
    fn persist(&self) {
        if let Err(e) = self.store.persist(&self.workspace) {
            tracing::warn!(error = %e, "Failed to persist workspace");
        }
    }

    /// Resolve the current board, healing the workspace if needed, and
    /// return its index. Fallback order: current pointer, first board,
    /// freshly synthesized default board.
    fn ensure_current_board(&mut self) -> usize {
        if let Some(id) = self.workspace.current_board_id {
            if let Some(i) = self.workspace.boards.iter().position(|b| b.id == id) {
                return i;
            }
        }
        if let Some(first) = self.workspace.boards.first() {
            self.workspace.current_board_id = Some(first.id);
            return 0;
        }
        let board = Board::default_board(self.workspace.user_id.clone());
        self.workspace.current_board_id = Some(board.id);
        self.workspace.boards.push(board);
        self.workspace.boards.len() - 1
    }

    /// The active board. Falls back to the first board when the current
    /// pointer is missing or dangling, and synthesizes a default board
    /// when the workspace has none.
    pub fn current_board(&mut self) -> &Board {
        let i = self.ensure_current_board();
        &self.workspace.boards[i]
    }

    /// Write a board back by id. Returns `false` (and changes nothing)
    /// when no board with that id exists.
    pub fn replace_board(&mut self, board: Board) -> bool {
        match self.workspace.board_mut(board.id) {
            Some(slot) => {
                *slot = board;
                self.persist();
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------
    // Board operations
    // -----------------------------------------------------------------

    /// Make a board current. No-op when the id does not resolve.
    pub fn switch_to_board(&mut self, board_id: EntityId) {
        if self.workspace.boards.iter().any(|b| b.id == board_id) {
            self.workspace.current_board_id = Some(board_id);
            self.persist();
        }
    }

    /// Create a board seeded with the default columns and make it current.
    /// An empty name defaults to "New Board".
    pub fn create_board(&mut self, name: &str) -> EntityId {
        let name = if name.is_empty() { "New Board" } else { name };
        let columns = vec![Column::new("To Do"), Column::new("In Progress")];
        let board = Board::new(name, columns, self.workspace.user_id.clone());
        let id = board.id;
        self.workspace.boards.push(board);
        self.workspace.current_board_id = Some(id);
        self.persist();
        id
    }

    pub fn rename_board(&mut self, board_id: EntityId, new_name: &str) {
        let Some(board) = self.workspace.board_mut(board_id) else {
            return;
        };
        board.name = new_name.to_string();
        board.touch();
        self.persist();
    }

    /// Delete a board. Refuses (no-op) when it is the last remaining
    /// board; reassigns the current pointer if the deleted board held it.
    pub fn delete_board(&mut self, board_id: EntityId) {
        if self.workspace.boards.len() <= 1 {
            return;
        }
        self.workspace.boards.retain(|b| b.id != board_id);
        if self.workspace.current_board_id == Some(board_id) {
            self.workspace.current_board_id = self.workspace.boards.first().map(|b| b.id);
        }
        self.persist();
    }

    /// Share a board with a user, replacing any prior share for the same
    /// user id (last write wins).
    pub fn share_board(
        &mut self,
        board_id: EntityId,
        user_id: &str,
        user_name: &str,
        access_level: AccessLevel,
    ) {
        let Some(board) = self.workspace.board_mut(board_id) else {
            return;
        };
        board.shared_with.retain(|s| s.user_id != user_id);
        board.shared_with.push(BoardShare {
            user_id: user_id.to_string(),
            user_name: user_name.to_string(),
            access_level,
            shared_at: chrono::Utc::now(),
        });
        board.touch();
        self.persist();
    }

    pub fn remove_share(&mut self, board_id: EntityId, user_id: &str) {
        let Some(board) = self.workspace.board_mut(board_id) else {
            return;
        };
        board.shared_with.retain(|s| s.user_id != user_id);
        board.touch();
        self.persist();
    }

    // -----------------------------------------------------------------
    // Card operations (all against the current board)
    // -----------------------------------------------------------------

    /// Create a card in a column of the current board. No-op when the
    /// column id does not resolve. The card's first history entry records
    /// the column it was created in.
    pub fn add_card(
        &mut self,
        column_id: EntityId,
        title: &str,
        description: &str,
        photo_file_names: Vec<String>,
        card_id: Option<EntityId>,
    ) {
        let bi = self.ensure_current_board();
        let board = &mut self.workspace.boards[bi];
        let Some(column) = board.columns.iter_mut().find(|c| c.id == column_id) else {
            return;
        };

        let mut card = Card::new(
            card_id.unwrap_or_else(Uuid::new_v4),
            title,
            description,
            photo_file_names,
        );
        card.add_history_entry(history::created_in(&column.title));
        column.cards.push(card);
        board.touch();
        self.persist();
    }

    /// Delete a card, releasing its attachment references. No-op when
    /// either id fails to resolve.
    pub fn delete_card(&mut self, card_id: EntityId, column_id: EntityId) {
        let bi = self.ensure_current_board();
        let board = &mut self.workspace.boards[bi];
        let Some(column) = board.columns.iter_mut().find(|c| c.id == column_id) else {
            return;
        };
        let Some(ci) = column.cards.iter().position(|c| c.id == card_id) else {
            return;
        };

        let card = column.cards.remove(ci);
        self.attachments.delete_all(&card.photo_file_names);
        board.touch();
        self.persist();
    }

    /// Replace a stored card with an updated version. A diff across
    /// {title, description, attachment count} yields at most one combined
    /// history entry; an unchanged card keeps its history verbatim but
    /// still gets a fresh `updated_at`.
    pub fn update_card(&mut self, new_card: Card, column_id: EntityId) {
        let bi = self.ensure_current_board();
        let board = &mut self.workspace.boards[bi];
        let Some(column) = board.columns.iter_mut().find(|c| c.id == column_id) else {
            return;
        };
        let Some(ci) = column.cards.iter().position(|c| c.id == new_card.id) else {
            return;
        };

        let old_card = &column.cards[ci];
        let mut updated = new_card;
        updated.updated_at = chrono::Utc::now();

        match history::describe_update(old_card, &updated) {
            Some(label) => updated.add_history_entry(label),
            None => updated.history = old_card.history.clone(),
        }

        column.cards[ci] = updated;
        board.touch();
        self.persist();
    }

    /// Move a card between columns (or within one), inserting at `index`
    /// clamped to the destination length. A history entry is appended only
    /// when the column titles differ.
    pub fn move_card(
        &mut self,
        card_id: EntityId,
        source_column_id: EntityId,
        destination_column_id: EntityId,
        index: usize,
    ) {
        let bi = self.ensure_current_board();
        let board = &mut self.workspace.boards[bi];

        let Some(si) = board.columns.iter().position(|c| c.id == source_column_id) else {
            return;
        };
        let Some(di) = board
            .columns
            .iter()
            .position(|c| c.id == destination_column_id)
        else {
            return;
        };
        let Some(ci) = board.columns[si].cards.iter().position(|c| c.id == card_id) else {
            return;
        };

        let mut card = board.columns[si].cards.remove(ci);
        let source_title = board.columns[si].title.clone();
        let destination_title = board.columns[di].title.clone();

        if source_title != destination_title {
            card.add_history_entry(history::moved(&source_title, &destination_title));
            card.updated_at = chrono::Utc::now();
        }

        let insert_index = index.min(board.columns[di].cards.len());
        board.columns[di].cards.insert(insert_index, card);
        board.touch();
        self.persist();
    }

    /// Terminal relocation into the board's completed bucket. One-way:
    /// no un-complete operation exists.
    pub fn mark_card_as_done(&mut self, card_id: EntityId, column_id: EntityId) {
        let bi = self.ensure_current_board();
        let board = &mut self.workspace.boards[bi];
        let Some(column) = board.columns.iter_mut().find(|c| c.id == column_id) else {
            return;
        };
        let Some(ci) = column.cards.iter().position(|c| c.id == card_id) else {
            return;
        };

        let mut card = column.cards.remove(ci);
        card.add_history_entry(history::MARKED_AS_DONE);
        card.updated_at = chrono::Utc::now();
        board.completed_cards.push(card);
        board.touch();
        self.persist();
    }

    /// The id of the column titled exactly "To Do" on the current board,
    /// used as a default insertion point. No normalization.
    pub fn to_do_column_id(&mut self) -> Option<EntityId> {
        let bi = self.ensure_current_board();
        self.workspace.boards[bi]
            .columns
            .iter()
            .find(|c| c.title == "To Do")
            .map(|c| c.id)
    }
}
