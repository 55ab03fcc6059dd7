use behavior_tree::Behavior;
use behavior_tree::builder::{inverter, selector, sequence};

use super::nodes::{
    AcquireTarget, IsAwayFromAnchor, IsGuarding, IsHunting, IsInTransit, ReturnToAnchor,
};
use super::{Decision, DecisionContext};

pub type DecisionTree = Box<dyn Behavior<DecisionContext>>;

/// The agent's decision tree.
///
/// ```text
/// Selector
/// ├── Sequence (guard)
/// │   ├── IsGuarding
/// │   └── Selector
/// │       ├── AcquireTarget            (guard radius ∩ engagement radius)
/// │       └── Sequence
/// │           ├── IsAwayFromAnchor
/// │           ├── Inverter(IsInTransit)
/// │           └── ReturnToAnchor
/// └── Sequence (hunt)
///     ├── IsHunting
///     └── AcquireTarget                (engagement radius)
/// ```
pub fn agent_tree() -> DecisionTree {
    selector(vec![
        sequence(vec![
            Box::new(IsGuarding),
            selector(vec![
                Box::new(AcquireTarget),
                sequence(vec![
                    Box::new(IsAwayFromAnchor),
                    inverter(Box::new(IsInTransit)),
                    Box::new(ReturnToAnchor),
                ]),
            ]),
        ]),
        sequence(vec![Box::new(IsHunting), Box::new(AcquireTarget)]),
    ])
}

/// Runs one tick and takes the resulting decision out of the context.
pub fn decide(tree: &DecisionTree, ctx: &mut DecisionContext) -> Option<Decision> {
    ctx.decision = None;
    tree.tick(ctx);
    ctx.decision.take()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hunter_core::{
        AgentConfig, AgentMode, EntityCategory, EntityId, EntitySnapshot, IdlePolicy, Position,
    };

    use super::*;

    const POST: Position = Position::new(0.0, 64.0, 0.0);

    fn zombie(id: u32, x: f64) -> EntitySnapshot {
        EntitySnapshot::new(
            EntityId(id),
            EntityCategory::Hostile,
            Position::new(x, 64.0, 0.0),
            "zombie",
        )
    }

    fn ctx(mode: AgentMode, at: f64, entities: Vec<EntitySnapshot>) -> DecisionContext {
        DecisionContext::new(
            mode,
            Position::new(at, 64.0, 0.0),
            entities,
            Arc::new(AgentConfig::default()),
        )
    }

    fn engaged(decision: Option<Decision>) -> Option<EntityId> {
        match decision {
            Some(Decision::Engage(entity)) => Some(entity.id),
            _ => None,
        }
    }

    #[test]
    fn guard_ignores_targets_outside_guard_radius() {
        let tree = agent_tree();
        let guarding = AgentMode::Guarding { anchor: POST };

        let mut far = ctx(guarding, 2.0, vec![zombie(1, 20.0)]);
        assert_eq!(decide(&tree, &mut far), None);

        let mut near = ctx(guarding, 2.0, vec![zombie(1, 10.0)]);
        assert_eq!(engaged(decide(&tree, &mut near)), Some(EntityId(1)));
    }

    #[test]
    fn guard_returns_when_drifted_and_idle() {
        let tree = agent_tree();
        let guarding = AgentMode::Guarding { anchor: POST };

        let mut drifted = ctx(guarding, 6.0, vec![]);
        assert_eq!(
            decide(&tree, &mut drifted),
            Some(Decision::ReturnToAnchor(POST))
        );

        let mut walking = ctx(guarding, 6.0, vec![]).in_transit(true);
        assert_eq!(decide(&tree, &mut walking), None);

        let mut at_post = ctx(guarding, 4.0, vec![]);
        assert_eq!(decide(&tree, &mut at_post), None);
    }

    #[test]
    fn a_target_beats_returning() {
        let tree = agent_tree();
        let mut ctx = ctx(AgentMode::Guarding { anchor: POST }, 6.0, vec![zombie(3, 9.0)])
            .in_transit(true);
        assert_eq!(engaged(decide(&tree, &mut ctx)), Some(EntityId(3)));
    }

    #[test]
    fn hunting_uses_engagement_radius_only() {
        let tree = agent_tree();
        let mut ctx = ctx(AgentMode::Hunting, 0.0, vec![zombie(1, 40.0), zombie(2, 30.0)]);
        assert_eq!(engaged(decide(&tree, &mut ctx)), Some(EntityId(2)));
    }

    #[test]
    fn idle_follows_policy() {
        let tree = agent_tree();

        let mut passive = ctx(AgentMode::Idle, 0.0, vec![zombie(1, 5.0)]);
        assert_eq!(decide(&tree, &mut passive), None);

        let mut hunting = DecisionContext::new(
            AgentMode::Idle,
            Position::new(0.0, 64.0, 0.0),
            vec![zombie(1, 5.0)],
            Arc::new(AgentConfig::default().with_idle_policy(IdlePolicy::Hunt)),
        );
        assert_eq!(engaged(decide(&tree, &mut hunting)), Some(EntityId(1)));
    }
}
