//! Weapon preference policy.

use crate::types::{InventoryView, ItemCategory, ItemStack, ToolClass, WeaponClass};

/// Melee preference, best first. Anything else means bare hands.
///
/// The pickaxe is a fallback, not a primary weapon.
pub const WEAPON_PREFERENCE: [ItemCategory; 3] = [
    ItemCategory::Weapon(WeaponClass::Sword),
    ItemCategory::Weapon(WeaponClass::Axe),
    ItemCategory::Tool(ToolClass::Pickaxe),
];

/// First stack of the most preferred weapon class present in the inventory.
pub fn best_weapon(inventory: &InventoryView) -> Option<&ItemStack> {
    WEAPON_PREFERENCE
        .iter()
        .find_map(|category| inventory.first_of(*category))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemKind;

    fn stack(slot: u16, id: u32, name: &str, category: ItemCategory) -> ItemStack {
        ItemStack::new(slot, ItemKind::new(id, name, category), 1)
    }

    #[test]
    fn sword_beats_axe_beats_pickaxe() {
        let inventory = InventoryView::new(vec![
            stack(36, 1, "iron_pickaxe", ItemCategory::Tool(ToolClass::Pickaxe)),
            stack(37, 2, "stone_axe", ItemCategory::Weapon(WeaponClass::Axe)),
            stack(38, 3, "wooden_sword", ItemCategory::Weapon(WeaponClass::Sword)),
        ]);
        assert_eq!(best_weapon(&inventory).unwrap().item.name, "wooden_sword");

        let no_sword: InventoryView = inventory
            .iter()
            .filter(|s| s.item.id != 3)
            .cloned()
            .collect();
        assert_eq!(best_weapon(&no_sword).unwrap().item.name, "stone_axe");
    }

    #[test]
    fn pickaxe_is_only_a_fallback() {
        let inventory = InventoryView::new(vec![stack(
            9,
            1,
            "diamond_pickaxe",
            ItemCategory::Tool(ToolClass::Pickaxe),
        )]);
        assert_eq!(best_weapon(&inventory).unwrap().item.name, "diamond_pickaxe");
    }

    #[test]
    fn ranged_weapons_and_tools_mean_bare_hands() {
        let inventory = InventoryView::new(vec![
            stack(36, 1, "bow", ItemCategory::Weapon(WeaponClass::Bow)),
            stack(37, 2, "iron_shovel", ItemCategory::Tool(ToolClass::Shovel)),
        ]);
        assert!(best_weapon(&inventory).is_none());
    }
}
