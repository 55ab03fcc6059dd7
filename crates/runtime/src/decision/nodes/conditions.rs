//! Condition nodes. They never modify the context.

use behavior_tree::{Behavior, Status};

use crate::decision::DecisionContext;

/// Succeeds while the agent holds a guard post.
pub struct IsGuarding;

impl Behavior<DecisionContext> for IsGuarding {
    fn tick(&self, ctx: &mut DecisionContext) -> Status {
        Status::from_bool(ctx.mode.is_guarding())
    }
}

/// Succeeds when the mode (or the idle policy) allows free hunting.
pub struct IsHunting;

impl Behavior<DecisionContext> for IsHunting {
    fn tick(&self, ctx: &mut DecisionContext) -> Status {
        Status::from_bool(ctx.hunts())
    }
}

/// Succeeds when the agent stands farther than the return threshold from its anchor.
pub struct IsAwayFromAnchor;

impl Behavior<DecisionContext> for IsAwayFromAnchor {
    fn tick(&self, ctx: &mut DecisionContext) -> Status {
        let away = ctx
            .mode
            .return_target(&ctx.position, ctx.config.return_threshold)
            .is_some();
        Status::from_bool(away)
    }
}

pub struct IsInTransit;

impl Behavior<DecisionContext> for IsInTransit {
    fn tick(&self, ctx: &mut DecisionContext) -> Status {
        Status::from_bool(ctx.in_transit)
    }
}
