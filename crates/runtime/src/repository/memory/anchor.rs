//! In-memory AnchorRepository implementation for tests and local runs.

use std::sync::RwLock;

use hunter_core::Position;

use crate::repository::{AnchorRepository, RepositoryError, Result};

/// Anchor store that lives as long as the process.
#[derive(Default)]
pub struct InMemoryAnchorRepository {
    anchor: RwLock<Option<Position>>,
}

impl InMemoryAnchorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an anchor already stored, as if saved by a previous run.
    pub fn with_anchor(anchor: Position) -> Self {
        Self {
            anchor: RwLock::new(Some(anchor)),
        }
    }
}

impl AnchorRepository for InMemoryAnchorRepository {
    fn load(&self) -> Result<Option<Position>> {
        let anchor = self
            .anchor
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(*anchor)
    }

    fn save(&self, anchor: &Position) -> Result<()> {
        let mut stored = self
            .anchor
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = Some(*anchor);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut stored = self
            .anchor
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = None;
        Ok(())
    }
}
