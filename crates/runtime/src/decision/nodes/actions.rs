//! Action nodes. Each one records at most one decision.

use behavior_tree::{Behavior, Status};
use hunter_core::nearest_target;

use crate::decision::{Decision, DecisionContext};

/// Picks the nearest valid target inside the mode's search area.
///
/// While guarding, the area is limited by both the engagement radius around
/// the agent and the guard radius around the anchor.
pub struct AcquireTarget;

impl Behavior<DecisionContext> for AcquireTarget {
    fn tick(&self, ctx: &mut DecisionContext) -> Status {
        let area = ctx.search_area();
        let target = nearest_target(&ctx.entities, &ctx.targets(), &area).cloned();

        match target {
            Some(entity) => {
                ctx.decision = Some(Decision::Engage(entity));
                Status::Success
            }
            None => Status::Failure,
        }
    }
}

/// Heads back to the guard anchor.
pub struct ReturnToAnchor;

impl Behavior<DecisionContext> for ReturnToAnchor {
    fn tick(&self, ctx: &mut DecisionContext) -> Status {
        match ctx.mode.anchor() {
            Some(anchor) => {
                ctx.decision = Some(Decision::ReturnToAnchor(anchor));
                Status::Success
            }
            None => Status::Failure,
        }
    }
}
