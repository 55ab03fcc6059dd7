use super::{ItemCategory, ItemKind, ItemStack, ToolClass};

/// Read-only copy of the agent's inventory taken at decision time.
///
/// The live inventory may change before a plan derived from this view is
/// executed; execution tolerates that (see the planner's batch semantics).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InventoryView {
    stacks: Vec<ItemStack>,
}

impl InventoryView {
    pub fn new(stacks: Vec<ItemStack>) -> Self {
        Self { stacks }
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemStack> {
        self.stacks.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Total count of one item kind across all slots.
    pub fn count_of(&self, item: &ItemKind) -> u32 {
        self.stacks
            .iter()
            .filter(|s| s.item.id == item.id)
            .map(|s| s.count)
            .sum()
    }

    pub fn stack_at(&self, slot: u16) -> Option<&ItemStack> {
        self.stacks.iter().find(|s| s.slot == slot)
    }

    /// First stack (in inventory order) whose category matches.
    pub fn first_of(&self, category: ItemCategory) -> Option<&ItemStack> {
        self.stacks.iter().find(|s| s.category() == category)
    }

    pub fn has_weapon(&self) -> bool {
        self.stacks.iter().any(|s| s.category().is_weapon())
    }

    pub fn has_tool(&self, class: ToolClass) -> bool {
        self.first_of(ItemCategory::Tool(class)).is_some()
    }

    pub fn has_shield(&self) -> bool {
        self.first_of(ItemCategory::Shield).is_some()
    }
}

impl FromIterator<ItemStack> for InventoryView {
    fn from_iter<I: IntoIterator<Item = ItemStack>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Half-open range of slot indices `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotRange {
    pub start: u16,
    pub end: u16,
}

impl SlotRange {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, slot: u16) -> bool {
        self.start <= slot && slot < self.end
    }

    /// Whether `other` lies entirely inside this range.
    pub fn covers(&self, other: &SlotRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Slot numbering of the agent's own inventory as seen through a window.
///
/// `hotbar` and `armor` are contiguous sub-ranges of `general`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotLayout {
    pub general: SlotRange,
    pub hotbar: SlotRange,
    pub armor: SlotRange,
}

impl SlotLayout {
    /// Player inventory window: armor 5-8, main storage 9-35, hotbar 36-44.
    pub const PLAYER_WINDOW: Self = Self {
        general: SlotRange::new(5, 45),
        hotbar: SlotRange::new(36, 45),
        armor: SlotRange::new(5, 9),
    };

    /// Builds a layout, rejecting sub-ranges that fall outside `general`.
    pub fn new(general: SlotRange, hotbar: SlotRange, armor: SlotRange) -> Option<Self> {
        (general.covers(&hotbar) && general.covers(&armor)).then_some(Self {
            general,
            hotbar,
            armor,
        })
    }

    /// Slots whose contents may be moved into storage.
    pub fn is_depositable(&self, slot: u16) -> bool {
        self.general.contains(slot) && !self.hotbar.contains(slot) && !self.armor.contains(slot)
    }
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self::PLAYER_WINDOW
    }
}

/// Contents of an opened storage container.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerView {
    pub stacks: Vec<ItemStack>,
    /// Layout of the agent's inventory slots within the same window.
    pub layout: SlotLayout,
}

impl ContainerView {
    pub fn new(stacks: Vec<ItemStack>, layout: SlotLayout) -> Self {
        Self { stacks, layout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_window_excludes_hotbar_and_armor() {
        let layout = SlotLayout::PLAYER_WINDOW;

        assert!(!layout.is_depositable(5));
        assert!(!layout.is_depositable(8));
        assert!(layout.is_depositable(9));
        assert!(layout.is_depositable(35));
        assert!(!layout.is_depositable(36));
        assert!(!layout.is_depositable(44));
        assert!(!layout.is_depositable(45));
    }

    #[test]
    fn layout_rejects_out_of_range_subranges() {
        let general = SlotRange::new(9, 45);
        assert!(SlotLayout::new(general, SlotRange::new(36, 45), SlotRange::new(5, 9)).is_none());
        assert!(SlotLayout::new(general, SlotRange::new(36, 45), SlotRange::new(9, 9)).is_some());
    }
}
