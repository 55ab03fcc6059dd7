use std::sync::Arc;

use hunter_core::{
    AgentConfig, AgentMode, EntitySnapshot, IdlePolicy, Position, SearchArea, TargetContext,
};

/// What the tree asks the controller to do this tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    Engage(EntitySnapshot),
    ReturnToAnchor(Position),
}

/// Blackboard for one decision tick.
///
/// Owns its snapshots: the entity list is rebuilt every tick and never
/// outlives it.
pub struct DecisionContext {
    pub mode: AgentMode,
    pub position: Position,
    pub entities: Vec<EntitySnapshot>,
    pub config: Arc<AgentConfig>,
    /// A movement is already in progress.
    pub in_transit: bool,
    pub decision: Option<Decision>,
}

impl DecisionContext {
    pub fn new(
        mode: AgentMode,
        position: Position,
        entities: Vec<EntitySnapshot>,
        config: Arc<AgentConfig>,
    ) -> Self {
        Self {
            mode,
            position,
            entities,
            config,
            in_transit: false,
            decision: None,
        }
    }

    pub fn in_transit(mut self, in_transit: bool) -> Self {
        self.in_transit = in_transit;
        self
    }

    pub fn targets(&self) -> TargetContext<'_> {
        TargetContext::from(self.config.as_ref())
    }

    /// Whether the current mode looks for targets anywhere in engagement range.
    pub fn hunts(&self) -> bool {
        match self.mode {
            AgentMode::Hunting => true,
            AgentMode::Idle => self.config.idle_policy == IdlePolicy::Hunt,
            AgentMode::Guarding { .. } => false,
        }
    }

    /// Search limits for the current mode. Guarding adds the anchor radius.
    pub fn search_area(&self) -> SearchArea {
        let area = SearchArea::around(self.position, self.config.engagement_radius);
        match self.mode.anchor() {
            Some(anchor) => area.guarding(anchor, self.config.guard_radius),
            None => area,
        }
    }
}
