//! Repository contracts for saving and loading the guard anchor.

use hunter_core::Position;

use super::Result;

/// Durable store for the single guard anchor.
///
/// `save` replaces any previous anchor; `clear` on an empty store is a no-op.
pub trait AnchorRepository: Send + Sync {
    fn load(&self) -> Result<Option<Position>>;

    fn save(&self, anchor: &Position) -> Result<()>;

    fn clear(&self) -> Result<()>;
}
