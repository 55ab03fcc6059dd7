//! Unified error types surfaced by the agent API.
//!
//! Wraps failures from the control loop, repositories and exclusive operations
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::operations::OperationError;
pub use crate::repository::RepositoryError;

use super::ports::PortError;

pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent controller command channel closed")]
    CommandChannelClosed,

    #[error("agent controller reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("agent controller join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("agent requires world capabilities to be configured before building")]
    MissingCapabilities,

    #[error("item catalog unavailable: {0}")]
    Catalog(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Port(#[from] PortError),
}
