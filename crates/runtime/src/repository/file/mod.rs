//! File-based repository implementations.

mod anchor;

pub use anchor::FileAnchorRepository;
