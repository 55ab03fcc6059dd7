//! Target classification and nearest-target search.
//!
//! [`is_valid_target`] is a pure predicate; [`nearest_target`] applies it to a
//! tick's entity snapshots together with the range limits of the current mode.

use crate::config::AgentConfig;
use crate::types::{CategorySet, EntityCategory, EntitySnapshot, Position};

/// Classifier inputs taken from the agent configuration.
#[derive(Clone, Copy, Debug)]
pub struct TargetContext<'a> {
    pub surface_threshold: f64,
    pub target_categories: CategorySet,
    pub inert_names: &'a [String],
}

impl<'a> From<&'a AgentConfig> for TargetContext<'a> {
    fn from(config: &'a AgentConfig) -> Self {
        Self {
            surface_threshold: config.surface_threshold,
            target_categories: config.target_categories,
            inert_names: &config.inert_names,
        }
    }
}

/// Decides whether an entity may be engaged.
///
/// Rules are applied in order and the first failing one excludes:
/// 1. players and inert props are never targets
/// 2. submerged entities are never targets
/// 3. entities below the surface threshold are ignored
/// 4. the category must be in the configured target set
pub fn is_valid_target(entity: &EntitySnapshot, ctx: &TargetContext<'_>) -> bool {
    if entity.category == EntityCategory::Player
        || ctx.inert_names.iter().any(|n| n == &entity.name)
    {
        return false;
    }
    if entity.submerged {
        return false;
    }
    if entity.position.y < ctx.surface_threshold {
        return false;
    }
    ctx.target_categories.includes(entity.category)
}

/// Where a target search is allowed to look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchArea {
    /// The agent's own position.
    pub origin: Position,
    pub engagement_radius: f64,
    /// Optional second constraint: `(anchor, guard_radius)`.
    pub anchor: Option<(Position, f64)>,
}

impl SearchArea {
    pub fn around(origin: Position, engagement_radius: f64) -> Self {
        Self {
            origin,
            engagement_radius,
            anchor: None,
        }
    }

    pub fn guarding(mut self, anchor: Position, guard_radius: f64) -> Self {
        self.anchor = Some((anchor, guard_radius));
        self
    }

    pub fn contains(&self, position: &Position) -> bool {
        if self.origin.distance_to(position) > self.engagement_radius {
            return false;
        }
        match self.anchor {
            Some((anchor, radius)) => anchor.distance_to(position) <= radius,
            None => true,
        }
    }
}

/// Nearest valid target inside `area`, by distance to the agent.
///
/// Ties keep the earliest entity in registry order.
pub fn nearest_target<'e>(
    entities: &'e [EntitySnapshot],
    ctx: &TargetContext<'_>,
    area: &SearchArea,
) -> Option<&'e EntitySnapshot> {
    entities
        .iter()
        .filter(|e| is_valid_target(e, ctx) && area.contains(&e.position))
        .map(|e| (area.origin.distance_to(&e.position), e))
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(_, e)| e)
}
