//! In-memory repository implementations for tests and offline sessions.

mod anchor;

pub use anchor::InMemoryAnchorRepository;
