//! Local persistence and the format migrator.
//!
//! The workspace is one serialized JSON document under a primary key file;
//! a distinct legacy key file holds the old single-board document and is
//! consulted only when the primary is absent or unreadable. Loading is
//! total: each parse strategy is tried in order, the first success wins,
//! and the last resort is a synthesized default workspace. Unreadable or
//! partially-readable data degrades rather than failing startup.

use std::fs;
use std::path::PathBuf;

use uuid::Uuid;

use crate::model::{Board, Workspace};

/// Primary key: the current multi-board workspace document.
pub const WORKSPACE_FILE: &str = "kanban_workspace_data.json";
/// Legacy key: the pre-multi-board single-board document.
pub const LEGACY_BOARD_FILE: &str = "kanban_board_data.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persist request issued by the engine after every successful transition.
///
/// Failure does not roll back the in-memory mutation: in-memory state is
/// authoritative for the running session and durability is best-effort.
pub trait WorkspaceStore {
    fn persist(&self, workspace: &Workspace) -> Result<(), StoreError>;
}

/// File-backed workspace store under a single data directory.
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open (and create if needed) the data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Load the workspace, migrating legacy layouts forward.
    ///
    /// Strategies, in order:
    /// 1. the current workspace document (current-board pointer repaired
    ///    if dangling);
    /// 2. the legacy single-board document, promoted into a one-board
    ///    workspace with a freshly generated board id and `user_id` as the
    ///    owner (an empty legacy name becomes "My Board");
    /// 3. a synthesized default workspace.
    pub fn load(&self, user_id: &str) -> Workspace {
        if let Some(mut workspace) = self.read_workspace() {
            workspace.repair_current_board();
            return workspace;
        }

        if let Some(legacy) = self.read_legacy_board() {
            tracing::info!("Migrating legacy single-board document to workspace format");
            return promote_legacy_board(legacy, user_id);
        }

        Workspace::with_default_board(user_id)
    }

    fn read_workspace(&self) -> Option<Workspace> {
        let raw = fs::read(self.dir.join(WORKSPACE_FILE)).ok()?;
        match serde_json::from_slice(&raw) {
            Ok(ws) => Some(ws),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable workspace document, falling back");
                None
            }
        }
    }

    fn read_legacy_board(&self) -> Option<Board> {
        let raw = fs::read(self.dir.join(LEGACY_BOARD_FILE)).ok()?;
        match serde_json::from_slice(&raw) {
            Ok(board) => Some(board),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable legacy board document, falling back");
                None
            }
        }
    }

    /// Write the workspace document atomically (temp file + rename).
    pub fn save(&self, workspace: &Workspace) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(workspace)?;
        let tmp = self.dir.join(format!("{WORKSPACE_FILE}.tmp"));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, self.dir.join(WORKSPACE_FILE))?;
        Ok(())
    }
}

impl WorkspaceStore for LocalStore {
    fn persist(&self, workspace: &Workspace) -> Result<(), StoreError> {
        self.save(workspace)
    }
}

/// Promote a legacy single board into a one-board workspace. The board gets
/// a fresh identity and the caller's user id as owner; columns, completed
/// cards, and timestamps carry over.
fn promote_legacy_board(legacy: Board, user_id: &str) -> Workspace {
    let board = Board {
        id: Uuid::new_v4(),
        name: if legacy.name.is_empty() {
            "My Board".to_string()
        } else {
            legacy.name
        },
        columns: legacy.columns,
        completed_cards: legacy.completed_cards,
        created_at: legacy.created_at,
        updated_at: legacy.updated_at,
        shared_with: Vec::new(),
        owner_id: user_id.to_string(),
    };
    let current = board.id;
    Workspace {
        boards: vec![board],
        current_board_id: Some(current),
        user_id: user_id.to_string(),
    }
}
