//! Runtime for the autonomous hunter agent.
//!
//! This crate wires the pure decision logic of `hunter-core` to world
//! capabilities, a guard anchor store and a single control loop. Consumers
//! build an [`Agent`], feed it world events through [`AgentHandle`], and
//! subscribe to events by topic.
//!
//! Modules are organized by responsibility:
//! - [`agent`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`decision`] holds the per-tick behavior tree
//! - [`operations`] runs the exclusive restock and deposit transactions
//! - [`repository`] persists the guard anchor
//! - [`sim`] is an in-process world that implements every capability
pub mod agent;
pub mod api;
pub mod decision;
pub mod equipment;
pub mod events;
pub mod gate;
pub mod operations;
pub mod repository;
pub mod sim;

mod notify;
mod workers;

pub use agent::{Agent, AgentBuilder, RuntimeConfig};
pub use api::{
    AgentError, AgentHandle, AgentStatus, AutoFeed, Capabilities, ChatChannel, Combat,
    ContainerSession, Containers, FeedSettings, Inventory, Movement, MovementError, PortError,
    PortResult, Result, TickOutcome, WorldView,
};
pub use equipment::{WeaponChoice, equip_weapon};
pub use events::{AgentEvent, EventBus, SkipReason, Topic, TravelOutcome, TravelPurpose};
pub use gate::{ExclusionGate, GatePermit};
pub use operations::{
    BUSY_MESSAGE, NO_CONTAINER_MESSAGE, OperationError, OperationKind, OperationReport,
};
pub use repository::{
    AnchorRepository, FileAnchorRepository, InMemoryAnchorRepository, RepositoryError,
};
pub use sim::{SimContainer, SimCounters, SimWorld, SimWorldBuilder};
