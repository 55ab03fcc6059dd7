use hunter_core::{AgentMode, EntityId, Position};

use crate::operations::{OperationKind, OperationReport};

use super::Topic;

/// Why a movement was started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum TravelPurpose {
    /// Walking to a newly assigned or restored guard anchor.
    TakePost,
    /// Walking back to the anchor after drifting or fighting.
    ReturnToPost,
    /// Following a `come` command.
    Come,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TravelOutcome {
    Arrived,
    Interrupted,
    Failed(String),
}

/// Why a scheduled or requested operation did not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    InCombat,
    Busy,
}

/// Events emitted by the agent controller.
#[derive(Clone, Debug, PartialEq)]
pub enum AgentEvent {
    ModeChanged {
        from: AgentMode,
        to: AgentMode,
    },
    Engaged {
        target: EntityId,
        name: String,
        position: Position,
    },
    CombatEnded {
        target: Option<EntityId>,
    },
    MovementFinished {
        purpose: TravelPurpose,
        outcome: TravelOutcome,
    },
    TransactionFinished {
        kind: OperationKind,
        report: OperationReport,
    },
    OperationSkipped {
        kind: OperationKind,
        reason: SkipReason,
    },
    /// The agent said something in chat.
    Notified(String),
}

impl AgentEvent {
    pub fn topic(&self) -> Topic {
        match self {
            AgentEvent::ModeChanged { .. } => Topic::Mode,
            AgentEvent::Engaged { .. } | AgentEvent::CombatEnded { .. } => Topic::Combat,
            AgentEvent::MovementFinished { .. } => Topic::Movement,
            AgentEvent::TransactionFinished { .. } | AgentEvent::OperationSkipped { .. } => {
                Topic::Operation
            }
            AgentEvent::Notified(_) => Topic::Chat,
        }
    }
}
