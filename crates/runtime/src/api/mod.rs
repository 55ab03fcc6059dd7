//! Public agent API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and infrastructure.

pub mod errors;
pub mod handle;
pub mod ports;
pub mod status;

pub use errors::{AgentError, Result};
pub use handle::AgentHandle;
pub use ports::{
    AutoFeed, Capabilities, ChatChannel, Combat, ContainerSession, Containers, FeedSettings,
    Inventory, Movement, MovementError, PortError, PortResult, WorldView,
};
pub use status::{AgentStatus, TickOutcome};
