use std::collections::{HashMap, HashSet};

use crate::config::AgentConfig;
use crate::types::{ContainerView, InventoryView, ItemCategory, ToolClass};

use super::WithdrawRequest;

/// Restock policy parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawPolicy {
    /// Each food kind is topped up to this count.
    pub food_threshold: u32,
    /// Food kinds that are never withdrawn.
    pub banned_foods: Vec<String>,
}

impl Default for WithdrawPolicy {
    fn default() -> Self {
        Self::from(&AgentConfig::default())
    }
}

impl From<&AgentConfig> for WithdrawPolicy {
    fn from(config: &AgentConfig) -> Self {
        Self {
            food_threshold: config.food_threshold,
            banned_foods: config.banned_foods.clone(),
        }
    }
}

/// What the agent will hold once the requests planned so far are carried out.
struct Projection {
    counts: HashMap<u32, u32>,
    has_weapon: bool,
    has_shield: bool,
    tools: HashSet<ToolClass>,
}

impl Projection {
    fn of(inventory: &InventoryView) -> Self {
        let mut projection = Self {
            counts: HashMap::new(),
            has_weapon: false,
            has_shield: false,
            tools: HashSet::new(),
        };
        for stack in inventory.iter() {
            projection.add(stack.item.id, stack.category(), stack.count);
        }
        projection
    }

    fn add(&mut self, item_id: u32, category: ItemCategory, count: u32) {
        *self.counts.entry(item_id).or_default() += count;
        match category {
            ItemCategory::Weapon(_) => self.has_weapon = true,
            ItemCategory::Shield => self.has_shield = true,
            ItemCategory::Tool(class) => {
                self.tools.insert(class);
            }
            _ => {}
        }
    }

    fn count(&self, item_id: u32) -> u32 {
        self.counts.get(&item_id).copied().unwrap_or(0)
    }
}

/// Plans the restock withdrawals for one container visit.
///
/// Container stacks are visited in slot order and each yields at most one
/// request:
///
/// - food: top up to `food_threshold`, never more than the stack holds
/// - weapon: one, only while the agent holds no weapon at all
/// - armor: one per stack, always (the best piece is picked at equip time)
/// - tool: one, only while the agent holds none of that base tool
/// - shield: one, only while the agent holds no shield
/// - anything else: ignored
///
/// Earlier requests count as held for later stacks, so two swords in the
/// container never produce two weapon requests.
pub fn plan_withdraw(
    container: &ContainerView,
    inventory: &InventoryView,
    policy: &WithdrawPolicy,
) -> Vec<WithdrawRequest> {
    let mut projection = Projection::of(inventory);
    let mut requests = Vec::new();

    let mut stacks: Vec<_> = container.stacks.iter().collect();
    stacks.sort_by_key(|s| s.slot);

    for stack in stacks {
        let wanted = match stack.category() {
            ItemCategory::Food => {
                if policy.banned_foods.iter().any(|b| b == &stack.item.name) {
                    0
                } else {
                    let held = projection.count(stack.item.id);
                    policy.food_threshold.saturating_sub(held).min(stack.count)
                }
            }
            ItemCategory::Weapon(_) if !projection.has_weapon => 1,
            ItemCategory::Armor(_) => 1,
            ItemCategory::Tool(class) if !projection.tools.contains(&class) => 1,
            ItemCategory::Shield if !projection.has_shield => 1,
            _ => 0,
        };

        if let Some(request) = WithdrawRequest::from_stack(stack, wanted.min(stack.count)) {
            projection.add(stack.item.id, stack.category(), request.count.get());
            requests.push(request);
        }
    }

    requests
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ArmorPiece, ItemKind, ItemStack, SlotLayout, WeaponClass};

    fn kind(id: u32, name: &str, category: ItemCategory) -> ItemKind {
        ItemKind::new(id, name, category)
    }

    fn beef() -> ItemKind {
        kind(1, "cooked_beef", ItemCategory::Food)
    }

    fn chest(stacks: Vec<ItemStack>) -> ContainerView {
        ContainerView::new(stacks, SlotLayout::PLAYER_WINDOW)
    }

    #[test]
    fn food_is_topped_up_to_threshold() {
        let container = chest(vec![ItemStack::new(0, beef(), 20)]);
        let inventory = InventoryView::new(vec![ItemStack::new(36, beef(), 3)]);

        let plan = plan_withdraw(&container, &inventory, &WithdrawPolicy::default());

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].count.get(), 13);
        assert_eq!(plan[0].slot, 0);
    }

    #[test]
    fn food_top_up_spans_several_stacks() {
        let container = chest(vec![
            ItemStack::new(0, beef(), 10),
            ItemStack::new(1, beef(), 10),
        ]);
        let inventory = InventoryView::new(vec![ItemStack::new(36, beef(), 3)]);

        let plan = plan_withdraw(&container, &inventory, &WithdrawPolicy::default());

        let counts: Vec<u32> = plan.iter().map(|r| r.count.get()).collect();
        assert_eq!(counts, vec![10, 3]);
    }

    #[test]
    fn no_food_request_at_or_above_threshold() {
        let container = chest(vec![ItemStack::new(0, beef(), 64)]);
        for held in [16, 17, 64] {
            let inventory = InventoryView::new(vec![ItemStack::new(36, beef(), held)]);
            assert!(plan_withdraw(&container, &inventory, &WithdrawPolicy::default()).is_empty());
        }
    }

    #[test]
    fn banned_food_is_never_withdrawn() {
        let flesh = kind(2, "rotten_flesh", ItemCategory::Food);
        let container = chest(vec![ItemStack::new(0, flesh, 30)]);

        let plan = plan_withdraw(&container, &InventoryView::default(), &WithdrawPolicy::default());
        assert!(plan.is_empty());
    }

    #[test]
    fn one_weapon_only_when_unarmed() {
        let sword = kind(10, "iron_sword", ItemCategory::Weapon(WeaponClass::Sword));
        let bow = kind(11, "bow", ItemCategory::Weapon(WeaponClass::Bow));
        let container = chest(vec![
            ItemStack::new(0, sword.clone(), 1),
            ItemStack::new(1, bow.clone(), 1),
            ItemStack::new(2, sword.clone(), 1),
        ]);

        let unarmed = plan_withdraw(&container, &InventoryView::default(), &WithdrawPolicy::default());
        assert_eq!(unarmed.len(), 1);
        assert_eq!(unarmed[0].item, sword);

        let armed = InventoryView::new(vec![ItemStack::new(36, bow, 1)]);
        assert!(plan_withdraw(&container, &armed, &WithdrawPolicy::default()).is_empty());
    }

    #[test]
    fn armor_is_requested_per_stack() {
        let helmet = kind(20, "iron_helmet", ItemCategory::Armor(ArmorPiece::Helmet));
        let container = chest(vec![
            ItemStack::new(3, helmet.clone(), 1),
            ItemStack::new(4, helmet.clone(), 2),
        ]);
        let wearing = InventoryView::new(vec![ItemStack::new(5, helmet, 1)]);

        let plan = plan_withdraw(&container, &wearing, &WithdrawPolicy::default());
        assert_eq!(plan.iter().map(|r| r.slot).collect::<Vec<_>>(), vec![3, 4]);
        assert!(plan.iter().all(|r| r.count.get() == 1));
    }

    #[test]
    fn tools_and_shield_are_requested_once_per_type() {
        let pick = kind(30, "iron_pickaxe", ItemCategory::Tool(ToolClass::Pickaxe));
        let stone_pick = kind(31, "stone_pickaxe", ItemCategory::Tool(ToolClass::Pickaxe));
        let shears = kind(32, "shears", ItemCategory::Tool(ToolClass::Shears));
        let shield = kind(40, "shield", ItemCategory::Shield);
        let container = chest(vec![
            ItemStack::new(0, pick, 1),
            ItemStack::new(1, stone_pick.clone(), 1),
            ItemStack::new(2, shears.clone(), 1),
            ItemStack::new(3, shield.clone(), 1),
            ItemStack::new(4, shield, 1),
        ]);
        let inventory = InventoryView::new(vec![ItemStack::new(9, shears, 1)]);

        let plan = plan_withdraw(&container, &inventory, &WithdrawPolicy::default());
        assert_eq!(plan.iter().map(|r| r.slot).collect::<Vec<_>>(), vec![0, 3]);
        assert!(plan.iter().all(|r| r.item != stone_pick));
    }

    #[test]
    fn output_follows_container_slot_order_without_duplicates() {
        let sword = kind(10, "iron_sword", ItemCategory::Weapon(WeaponClass::Sword));
        let boots = kind(21, "iron_boots", ItemCategory::Armor(ArmorPiece::Boots));
        let dirt = kind(50, "dirt", ItemCategory::Other);
        let container = chest(vec![
            ItemStack::new(7, beef(), 5),
            ItemStack::new(2, boots, 1),
            ItemStack::new(5, dirt, 64),
            ItemStack::new(0, sword, 1),
        ]);

        let plan = plan_withdraw(&container, &InventoryView::default(), &WithdrawPolicy::default());
        let slots: Vec<u16> = plan.iter().map(|r| r.slot).collect();
        assert_eq!(slots, vec![0, 2, 7]);
    }
}
