//! File-based AnchorRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use hunter_core::Position;

use crate::repository::{AnchorRepository, RepositoryError, Result};

/// Stores the anchor as a small JSON document, `{"x": .., "y": .., "z": ..}`.
///
/// Writes go to a temp file first and are renamed into place, so a crash
/// leaves either the old anchor or the new one.
pub struct FileAnchorRepository {
    path: PathBuf,
}

impl FileAnchorRepository {
    pub const FILE_NAME: &'static str = "guard_anchor.json";

    /// Create a repository storing `guard_anchor.json` under `base_dir`.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;
        Ok(Self {
            path: base_dir.join(Self::FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnchorRepository for FileAnchorRepository {
    fn load(&self) -> Result<Option<Position>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path).map_err(RepositoryError::Io)?;
        let anchor: Position =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Corrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Loaded guard anchor {} from {}", anchor, self.path.display());

        Ok(Some(anchor))
    }

    fn save(&self, anchor: &Position) -> Result<()> {
        let temp_path = self.path.with_extension("json.tmp");

        let bytes =
            serde_json::to_vec_pretty(anchor).map_err(|e| RepositoryError::Encode(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved guard anchor {} to {}", anchor, self.path.display());

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(RepositoryError::Io)?;
            tracing::debug!("Cleared guard anchor");
        }

        Ok(())
    }
}
