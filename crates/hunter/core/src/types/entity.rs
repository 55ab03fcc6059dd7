use std::fmt;

use bitflags::bitflags;

use super::Position;

/// Identifier assigned to an entity by the world registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse classification reported by the world registry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityCategory {
    Hostile,
    Passive,
    Animal,
    WaterCreature,
    Player,
    Object,
    Other,
}

bitflags! {
    /// Set of entity categories, used for the configurable target filter.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CategorySet: u8 {
        const HOSTILE        = 1 << 0;
        const PASSIVE        = 1 << 1;
        const ANIMAL         = 1 << 2;
        const WATER_CREATURE = 1 << 3;
        const PLAYER         = 1 << 4;
        const OBJECT         = 1 << 5;
        const OTHER          = 1 << 6;
    }
}

impl CategorySet {
    /// Hostile mobs, passive mobs and animals.
    pub const DEFAULT_TARGETS: Self = Self::HOSTILE.union(Self::PASSIVE).union(Self::ANIMAL);

    pub fn includes(&self, category: EntityCategory) -> bool {
        self.contains(CategorySet::from(category))
    }

    /// Member categories in declaration order.
    pub fn categories(&self) -> Vec<EntityCategory> {
        use strum::IntoEnumIterator;
        EntityCategory::iter().filter(|c| self.includes(*c)).collect()
    }
}

impl From<EntityCategory> for CategorySet {
    fn from(category: EntityCategory) -> Self {
        match category {
            EntityCategory::Hostile => CategorySet::HOSTILE,
            EntityCategory::Passive => CategorySet::PASSIVE,
            EntityCategory::Animal => CategorySet::ANIMAL,
            EntityCategory::WaterCreature => CategorySet::WATER_CREATURE,
            EntityCategory::Player => CategorySet::PLAYER,
            EntityCategory::Object => CategorySet::OBJECT,
            EntityCategory::Other => CategorySet::OTHER,
        }
    }
}

impl FromIterator<EntityCategory> for CategorySet {
    fn from_iter<I: IntoIterator<Item = EntityCategory>>(iter: I) -> Self {
        iter.into_iter()
            .fold(CategorySet::empty(), |set, c| set | CategorySet::from(c))
    }
}

// Serialized as a list of category names so config files stay readable.
#[cfg(feature = "serde")]
impl serde::Serialize for CategorySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.categories())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CategorySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let categories = Vec::<EntityCategory>::deserialize(deserializer)?;
        Ok(categories.into_iter().collect())
    }
}

/// One entity as seen during a single decision tick.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub category: EntityCategory,
    pub position: Position,
    /// Entity is in water or lava.
    pub submerged: bool,
    /// Registry name of the entity type, e.g. `zombie` or `armor_stand`.
    pub name: String,
}

impl EntitySnapshot {
    pub fn new(
        id: EntityId,
        category: EntityCategory,
        position: Position,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            category,
            position,
            submerged: false,
            name: name.into(),
        }
    }

    pub fn submerged(mut self, submerged: bool) -> Self {
        self.submerged = submerged;
        self
    }
}
