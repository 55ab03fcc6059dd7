//! Repository layer for data that survives restarts.
//!
//! The only durable record is the guard anchor. Static content (items,
//! configuration) comes from the content crate, not from repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileAnchorRepository;
pub use memory::InMemoryAnchorRepository;
pub use traits::AnchorRepository;
