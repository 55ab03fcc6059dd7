use std::fmt;

/// Weapon families the restock policy tracks.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WeaponClass {
    Sword,
    Axe,
    Bow,
    Crossbow,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ArmorPiece {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
}

/// Base utility tool types. Two pickaxes of different tiers share a class.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ToolClass {
    Pickaxe,
    Shovel,
    Hoe,
    Shears,
    FishingRod,
    FlintAndSteel,
}

/// Category tag attached to every item kind when the item catalog is loaded.
///
/// Decision code only ever looks at this tag; it never inspects item names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Food,
    Weapon(WeaponClass),
    Armor(ArmorPiece),
    Tool(ToolClass),
    Shield,
    #[default]
    Other,
}

impl ItemCategory {
    pub fn is_food(&self) -> bool {
        matches!(self, ItemCategory::Food)
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, ItemCategory::Weapon(_))
    }

    pub fn is_armor(&self) -> bool {
        matches!(self, ItemCategory::Armor(_))
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemCategory::Food => f.write_str("food"),
            ItemCategory::Weapon(class) => write!(f, "weapon/{class}"),
            ItemCategory::Armor(piece) => write!(f, "armor/{piece}"),
            ItemCategory::Tool(class) => write!(f, "tool/{class}"),
            ItemCategory::Shield => f.write_str("shield"),
            ItemCategory::Other => f.write_str("other"),
        }
    }
}

/// Item type definition with its resolved category.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemKind {
    pub id: u32,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: ItemCategory,
}

impl ItemKind {
    pub fn new(id: u32, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            category,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Opaque per-stack data (enchantments, custom names, damage).
///
/// The agent never interprets it; it only carries it along with the stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagData(pub Vec<u8>);

/// Items of one kind occupying one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemStack {
    pub slot: u16,
    pub item: ItemKind,
    pub count: u32,
    pub tag: Option<TagData>,
}

impl ItemStack {
    pub fn new(slot: u16, item: ItemKind, count: u32) -> Self {
        Self {
            slot,
            item,
            count,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: TagData) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn category(&self) -> ItemCategory {
        self.item.category
    }
}
