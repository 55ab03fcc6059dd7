use crate::types::{InventoryView, SlotLayout};

use super::DepositRequest;

/// Plans a deposit of everything in general storage.
///
/// Hotbar and equipped-armor slots are never included, whatever they hold.
/// Each occupied slot becomes one request for its full stack, tag data
/// included, in slot order.
pub fn plan_deposit(inventory: &InventoryView, layout: &SlotLayout) -> Vec<DepositRequest> {
    let mut stacks: Vec<_> = inventory
        .iter()
        .filter(|s| layout.is_depositable(s.slot))
        .collect();
    stacks.sort_by_key(|s| s.slot);

    stacks
        .into_iter()
        .filter_map(DepositRequest::from_stack)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArmorPiece, ItemCategory, ItemKind, ItemStack, SlotRange, TagData};

    fn bone() -> ItemKind {
        ItemKind::new(1, "bone", ItemCategory::Other)
    }

    #[test]
    fn hotbar_and_armor_slots_are_kept() {
        let chestplate = ItemKind::new(2, "iron_chestplate", ItemCategory::Armor(ArmorPiece::Chestplate));
        let inventory = InventoryView::new(vec![
            ItemStack::new(6, chestplate, 1),
            ItemStack::new(12, bone(), 7),
            ItemStack::new(36, bone(), 3),
            ItemStack::new(44, bone(), 1),
        ]);

        let plan = plan_deposit(&inventory, &SlotLayout::PLAYER_WINDOW);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].slot, 12);
        assert_eq!(plan[0].count.get(), 7);
    }

    #[test]
    fn full_stack_and_tag_data_are_carried() {
        let enchanted = ItemStack::new(20, bone(), 64).with_tag(TagData(vec![1, 2, 3]));
        let inventory = InventoryView::new(vec![enchanted, ItemStack::new(10, bone(), 0)]);

        let plan = plan_deposit(&inventory, &SlotLayout::PLAYER_WINDOW);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].count.get(), 64);
        assert_eq!(plan[0].tag, Some(TagData(vec![1, 2, 3])));
    }

    #[test]
    fn respects_window_specific_layout() {
        // A 27-slot chest window shifts the agent inventory to 27..63.
        let layout = SlotLayout::new(
            SlotRange::new(27, 63),
            SlotRange::new(54, 63),
            SlotRange::new(27, 27),
        )
        .unwrap();
        let inventory = InventoryView::new(vec![
            ItemStack::new(30, bone(), 2),
            ItemStack::new(27, bone(), 1),
            ItemStack::new(55, bone(), 4),
            ItemStack::new(3, bone(), 9),
        ]);

        let plan = plan_deposit(&inventory, &layout);
        assert_eq!(plan.iter().map(|r| r.slot).collect::<Vec<_>>(), vec![27, 30]);
    }
}
