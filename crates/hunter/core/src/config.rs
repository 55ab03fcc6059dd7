//! Tunable parameters for the agent's decision policies.

use crate::types::CategorySet;

/// Whether an agent in `Idle` mode looks for targets on its own.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IdlePolicy {
    /// Idle agents stand still; hunting requires the `hunt` command.
    #[default]
    Passive,
    /// Idle agents hunt exactly like `Hunting` mode.
    Hunt,
}

/// Decision policy configuration.
///
/// Every field has a default, so partial config files are accepted.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    // ===== targeting =====
    /// Entity categories the agent may engage.
    pub target_categories: CategorySet,
    /// Entities below this height are ignored (caves, underground layers).
    pub surface_threshold: f64,
    /// Entity type names that are props rather than living things.
    pub inert_names: Vec<String>,

    // ===== ranges =====
    /// Max distance from the anchor for a target to matter while guarding.
    pub guard_radius: f64,
    /// Max distance from the agent for any target acquisition.
    pub engagement_radius: f64,
    /// Guarding agents walk back once farther than this from the anchor.
    pub return_threshold: f64,
    /// Goal tolerance when walking to the anchor.
    pub guard_approach_tolerance: f64,
    /// Goal tolerance for the `come` command.
    pub come_tolerance: f64,

    // ===== supplies =====
    /// Desired count of each food kind after a restock.
    pub food_threshold: u32,
    /// Foods never eaten and never withdrawn.
    pub banned_foods: Vec<String>,
    /// Hunger level at or below which auto-feed eats.
    pub min_hunger: u32,

    // ===== containers =====
    /// Block names that count as storage containers.
    pub container_kinds: Vec<String>,
    pub container_search_radius: f64,
    pub container_approach_tolerance: f64,

    pub idle_policy: IdlePolicy,
}

impl AgentConfig {
    pub const DEFAULT_SURFACE_THRESHOLD: f64 = 60.0;
    pub const DEFAULT_GUARD_RADIUS: f64 = 16.0;
    pub const DEFAULT_ENGAGEMENT_RADIUS: f64 = 32.0;
    pub const DEFAULT_RETURN_THRESHOLD: f64 = 4.0;
    pub const DEFAULT_FOOD_THRESHOLD: u32 = 16;
    pub const DEFAULT_MIN_HUNGER: u32 = 14;
    pub const DEFAULT_CONTAINER_SEARCH_RADIUS: f64 = 32.0;

    pub fn new() -> Self {
        Self {
            target_categories: CategorySet::DEFAULT_TARGETS,
            surface_threshold: Self::DEFAULT_SURFACE_THRESHOLD,
            inert_names: strings(&["armor_stand", "item_frame", "glow_item_frame", "painting"]),
            guard_radius: Self::DEFAULT_GUARD_RADIUS,
            engagement_radius: Self::DEFAULT_ENGAGEMENT_RADIUS,
            return_threshold: Self::DEFAULT_RETURN_THRESHOLD,
            guard_approach_tolerance: 1.0,
            come_tolerance: 2.0,
            food_threshold: Self::DEFAULT_FOOD_THRESHOLD,
            banned_foods: strings(&[
                "rotten_flesh",
                "pufferfish",
                "chorus_fruit",
                "poisonous_potato",
                "spider_eye",
            ]),
            min_hunger: Self::DEFAULT_MIN_HUNGER,
            container_kinds: strings(&["chest", "trapped_chest", "barrel"]),
            container_search_radius: Self::DEFAULT_CONTAINER_SEARCH_RADIUS,
            container_approach_tolerance: 2.0,
            idle_policy: IdlePolicy::Passive,
        }
    }

    pub fn with_idle_policy(mut self, idle_policy: IdlePolicy) -> Self {
        self.idle_policy = idle_policy;
        self
    }

    pub fn with_target_categories(mut self, categories: CategorySet) -> Self {
        self.target_categories = categories;
        self
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::types::EntityCategory;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AgentConfig = serde_json::from_str(
            r#"{ "guard_radius": 8.0, "target_categories": ["hostile", "water_creature"] }"#,
        )
        .unwrap();

        assert_eq!(config.guard_radius, 8.0);
        assert_eq!(config.engagement_radius, AgentConfig::DEFAULT_ENGAGEMENT_RADIUS);
        assert!(config.target_categories.includes(EntityCategory::WaterCreature));
        assert!(!config.target_categories.includes(EntityCategory::Animal));
    }
}
