//! Guard anchor storage errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("anchor store lock was poisoned")]
    LockPoisoned,

    #[error("anchor file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document is not a position.
    #[error("anchor file {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("anchor could not be encoded: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
