//! Durable per-device sync bookkeeping.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use kanban_core::types::{EntityId, Timestamp};

use crate::api::SyncError;

/// File the agent's bookkeeping lives in, next to the workspace document.
pub const STATE_FILE: &str = "sync_state.json";

/// Watermarks and the local-to-server id map for one device.
///
/// `server_ids` covers every pushed entity: boards and columns need
/// their server ids so later pushes can address parents (the server
/// assigns fresh ids on create), and cards need theirs so the pull side
/// recognizes records this device itself pushed instead of merging them
/// back as duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncState {
    /// Highest `createdAt` observed across all pulled records. The next
    /// pull asks only for records created after this point.
    pub cursor: Option<Timestamp>,
    /// When the last successful push cycle ran. Cards created before
    /// this are assumed already pushed.
    pub last_pushed_at: Option<Timestamp>,
    /// Local entity id -> server-assigned id.
    #[serde(default)]
    pub server_ids: HashMap<EntityId, EntityId>,
}

impl SyncState {
    /// Load state from `dir`, falling back to a fresh default when the
    /// file is absent or unreadable. A corrupt state file only costs a
    /// full re-sync, so it is never fatal.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(STATE_FILE);
        match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Corrupt sync state, starting fresh");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Write state atomically (temp file then rename).
    pub fn save(&self, dir: &Path) -> Result<(), SyncError> {
        let path = dir.join(STATE_FILE);
        let tmp: PathBuf = path.with_extension("json.tmp");

        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| SyncError::Store(format!("serialize sync state: {e}")))?;
        fs::write(&tmp, raw).map_err(|e| SyncError::Store(format!("write sync state: {e}")))?;
        fs::rename(&tmp, &path)
            .map_err(|e| SyncError::Store(format!("replace sync state: {e}")))?;
        Ok(())
    }

    /// Record a pulled timestamp, advancing the cursor when it is newer.
    pub fn observe_pulled(&mut self, created_at: Timestamp) {
        if self.cursor.is_none_or(|cursor| created_at > cursor) {
            self.cursor = Some(created_at);
        }
    }
}
