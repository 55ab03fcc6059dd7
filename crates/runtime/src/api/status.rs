use hunter_core::{AgentMode, EntityId, Position};

use crate::events::{SkipReason, TravelPurpose};

/// Point-in-time view of the controller state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentStatus {
    pub mode: AgentMode,
    /// Target of the engagement the controller started, until it ends.
    pub engaged: Option<EntityId>,
    pub transit: Option<TravelPurpose>,
    /// An exclusive operation holds the gate.
    pub busy: bool,
}

/// What a decision tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    Skipped(SkipReason),
    Engaged(EntityId),
    Returning(Position),
    /// Nothing to do.
    Idle,
    /// The world could not be observed.
    Unavailable,
}
