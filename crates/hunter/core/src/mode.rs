//! Agent modes and the transitions chat commands cause.
//!
//! The control loop owns the current [`AgentMode`]; it asks the mode what a
//! [`ModeCommand`] does and then carries out the returned [`Transition`]
//! (persisting or clearing the anchor, halting combat, starting travel).

use std::fmt;

use crate::types::Position;

/// Top-level behaviour of the agent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum AgentMode {
    #[default]
    Idle,
    Hunting,
    /// Defend a fixed post. The anchor is a copy, never a live entity position.
    Guarding { anchor: Position },
}

impl AgentMode {
    pub fn anchor(&self) -> Option<Position> {
        match self {
            Self::Guarding { anchor } => Some(*anchor),
            _ => None,
        }
    }

    pub fn is_guarding(&self) -> bool {
        matches!(self, Self::Guarding { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Hunting => "hunting",
            Self::Guarding { .. } => "guarding",
        }
    }

    /// The anchor to walk back to, when guarding farther than `threshold` from it.
    pub fn return_target(&self, position: &Position, threshold: f64) -> Option<Position> {
        self.anchor()
            .filter(|anchor| anchor.distance_to(position) > threshold)
    }

    /// Resolves a mode command against the current mode.
    pub fn transition(&self, command: ModeCommand) -> Transition {
        match command {
            ModeCommand::Stop => Transition {
                mode: Self::Idle,
                anchor: AnchorChange::Clear,
                halt_combat: true,
                cancel_travel: true,
                travel_to: None,
            },
            ModeCommand::Hunt => Transition {
                mode: Self::Hunting,
                anchor: AnchorChange::Clear,
                halt_combat: false,
                cancel_travel: self.is_guarding(),
                travel_to: None,
            },
            ModeCommand::Guard { at } => Transition {
                mode: Self::Guarding { anchor: at },
                anchor: AnchorChange::Store(at),
                halt_combat: false,
                cancel_travel: true,
                travel_to: Some(at),
            },
            ModeCommand::Restore { anchor } => Transition {
                mode: Self::Guarding { anchor },
                anchor: AnchorChange::Unchanged,
                halt_combat: false,
                cancel_travel: false,
                travel_to: Some(anchor),
            },
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guarding { anchor } => write!(f, "guarding {anchor}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Requests that change the agent's mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModeCommand {
    Stop,
    Hunt,
    /// Guard the given position, usually the speaker's.
    Guard { at: Position },
    /// Resume guarding a persisted anchor at startup.
    Restore { anchor: Position },
}

/// What happens to the persisted anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnchorChange {
    Unchanged,
    Store(Position),
    Clear,
}

/// Effects of a mode command, applied by the control loop in field order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub mode: AgentMode,
    pub anchor: AnchorChange,
    /// Stop attacking the current target.
    pub halt_combat: bool,
    /// Abort any movement in progress.
    pub cancel_travel: bool,
    pub travel_to: Option<Position>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST: Position = Position::new(10.0, 64.0, -4.0);

    fn all_modes() -> [AgentMode; 3] {
        [
            AgentMode::Idle,
            AgentMode::Hunting,
            AgentMode::Guarding { anchor: POST },
        ]
    }

    #[test]
    fn stop_from_any_mode_goes_idle_and_clears_anchor() {
        for mode in all_modes() {
            let t = mode.transition(ModeCommand::Stop);
            assert_eq!(t.mode, AgentMode::Idle);
            assert_eq!(t.anchor, AnchorChange::Clear);
            assert!(t.halt_combat && t.cancel_travel);
            assert_eq!(t.travel_to, None);
        }
    }

    #[test]
    fn guard_stores_anchor_and_travels_there() {
        let t = AgentMode::Hunting.transition(ModeCommand::Guard { at: POST });
        assert_eq!(t.mode.anchor(), Some(POST));
        assert_eq!(t.anchor, AnchorChange::Store(POST));
        assert_eq!(t.travel_to, Some(POST));
    }

    #[test]
    fn hunt_drops_the_post() {
        let t = AgentMode::Guarding { anchor: POST }.transition(ModeCommand::Hunt);
        assert_eq!(t.mode, AgentMode::Hunting);
        assert_eq!(t.anchor, AnchorChange::Clear);
        assert!(t.cancel_travel);
        assert!(!t.halt_combat);
    }

    #[test]
    fn restore_keeps_stored_anchor() {
        let t = AgentMode::Idle.transition(ModeCommand::Restore { anchor: POST });
        assert_eq!(t.mode, AgentMode::Guarding { anchor: POST });
        assert_eq!(t.anchor, AnchorChange::Unchanged);
        assert_eq!(t.travel_to, Some(POST));
    }

    #[test]
    fn return_target_only_past_threshold() {
        let mode = AgentMode::Guarding { anchor: POST };
        let near = Position::new(13.0, 64.0, -4.0);
        let far = Position::new(14.5, 64.0, -4.0);

        assert_eq!(mode.return_target(&near, 4.0), None);
        assert_eq!(mode.return_target(&far, 4.0), Some(POST));
        assert_eq!(AgentMode::Hunting.return_target(&far, 4.0), None);
    }
}
