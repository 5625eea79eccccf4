//! File-system [`DocumentStore`].
//!
//! A plain truncate-and-write: no temp file, no rename, no lock.  A UTF-8
//! byte-order mark, if present, is read as `U+FEFF` and written back as-is.

use std::io;
use std::path::Path;

use tracing::trace;

use crate::application::patch_config::DocumentStore;

/// Reads and writes documents directly on the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDocumentStore;

impl FsDocumentStore {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FsDocumentStore {
    fn read(&self, path: &Path) -> io::Result<String> {
        let content = std::fs::read_to_string(path)?;
        trace!(path = %path.display(), bytes = content.len(), "read document");
        Ok(content)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)?;
        trace!(path = %path.display(), bytes = contents.len(), "wrote document");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use uuid::Uuid;

    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("phpini_fs_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_write_then_read_returns_same_text() {
        // Arrange
        let dir = temp_dir();
        let path = dir.join("php.ini");
        let store = FsDocumentStore::new();

        // Act
        store.write(&path, "extension=curl\r\n; ünïcödé\n").unwrap();
        let read = store.read(&path).unwrap();

        // Assert
        assert_eq!(read, "extension=curl\r\n; ünïcödé\n");

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_missing_file_is_not_found() {
        let dir = temp_dir();
        let err = FsDocumentStore::new()
            .read(&dir.join("missing.ini"))
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_read_non_utf8_file_is_invalid_data() {
        // Arrange: Latin-1 `é` on its own is not valid UTF-8
        let dir = temp_dir();
        let path = dir.join("latin1.ini");
        std::fs::write(&path, b";caf\xE9\n").unwrap();

        // Act
        let err = FsDocumentStore::new().read(&path).unwrap_err();

        // Assert
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_byte_order_mark_survives_round_trip() {
        let dir = temp_dir();
        let path = dir.join("bom.ini");
        std::fs::write(&path, "\u{FEFF};extension=curl\n").unwrap();
        let store = FsDocumentStore::new();

        let content = store.read(&path).unwrap();
        store.write(&path, &content).unwrap();

        assert_eq!(
            std::fs::read(&path).unwrap(),
            b"\xEF\xBB\xBF;extension=curl\n".to_vec()
        );
        std::fs::remove_dir_all(&dir).ok();
    }
}
