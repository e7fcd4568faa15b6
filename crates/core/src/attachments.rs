//! Attachment storage capability.
//!
//! Cards hold opaque file-name references; the bytes behind them live
//! outside the entity model. The engine takes this capability as an
//! injected dependency so tests can substitute [`NoopAttachmentStore`].

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::types::EntityId;

/// Save/load/delete attachment bytes by opaque file-name reference.
pub trait AttachmentStore {
    /// Persist `bytes` for a card and return the reference to store on it.
    fn save(&self, bytes: &[u8], card_id: EntityId, index: usize) -> io::Result<String>;

    /// Fetch the bytes behind a reference.
    fn load(&self, file_name: &str) -> io::Result<Vec<u8>>;

    /// Release one reference. Best-effort: a missing file is not an error.
    fn delete(&self, file_name: &str);

    /// Release every reference a card held (used on card delete).
    fn delete_all(&self, file_names: &[String]) {
        for name in file_names {
            self.delete(name);
        }
    }
}

/// Filesystem-backed store writing `<card_id>_<index>.jpg` under a single
/// images directory.
pub struct FsAttachmentStore {
    dir: PathBuf,
}

impl FsAttachmentStore {
    /// Open (and create if needed) the images directory.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }
}

impl AttachmentStore for FsAttachmentStore {
    fn save(&self, bytes: &[u8], card_id: EntityId, index: usize) -> io::Result<String> {
        let file_name = format!("{card_id}_{index}.jpg");
        fs::write(self.dir.join(&file_name), bytes)?;
        Ok(file_name)
    }

    fn load(&self, file_name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.dir.join(file_name))
    }

    fn delete(&self, file_name: &str) {
        let path = self.dir.join(file_name);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(file_name, error = %e, "Failed to delete attachment");
            }
        }
    }
}

/// Discards writes and returns nothing on reads. For tests and for callers
/// that carry no attachments.
#[derive(Default)]
pub struct NoopAttachmentStore;

impl AttachmentStore for NoopAttachmentStore {
    fn save(&self, _bytes: &[u8], card_id: EntityId, index: usize) -> io::Result<String> {
        Ok(format!("{card_id}_{index}.jpg"))
    }

    fn load(&self, file_name: &str) -> io::Result<Vec<u8>> {
        Err(io::Error::new(io::ErrorKind::NotFound, file_name.to_string()))
    }

    fn delete(&self, _file_name: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn fs_store_save_load_delete_cycle() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsAttachmentStore::new(tmp.path().join("CardImages")).unwrap();
        let card_id = Uuid::new_v4();

        let name = store.save(b"jpeg-bytes", card_id, 0).unwrap();
        assert_eq!(name, format!("{card_id}_0.jpg"));
        assert_eq!(store.load(&name).unwrap(), b"jpeg-bytes");

        store.delete(&name);
        assert!(store.load(&name).is_err());

        // Deleting again is a no-op, not an error.
        store.delete(&name);
    }
}
