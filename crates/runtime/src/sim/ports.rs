use async_trait::async_trait;
use hunter_core::{
    ArmorPiece, BlockPos, EntityId, EntitySnapshot, InventoryView, ItemCategory, ItemKind,
    Position, SlotLayout,
};

use super::SimWorld;
use super::container::SimSession;
use crate::api::{
    AutoFeed, ChatChannel, Combat, ContainerSession, Containers, FeedSettings, Inventory,
    Movement, MovementError, PortError, PortResult, WorldView,
};

/// Distance below which a goal counts as reached.
const ARRIVAL_EPSILON: f64 = 1e-6;

const ARMOR_SLOTS: [(ArmorPiece, u16); 4] = [
    (ArmorPiece::Helmet, 5),
    (ArmorPiece::Chestplate, 6),
    (ArmorPiece::Leggings, 7),
    (ArmorPiece::Boots, 8),
];

#[async_trait]
impl WorldView for SimWorld {
    async fn self_position(&self) -> PortResult<Position> {
        Ok(self.position())
    }

    async fn entities(&self) -> PortResult<Vec<EntitySnapshot>> {
        Ok(self.state().entities.clone())
    }

    async fn player_position(&self, name: &str) -> PortResult<Option<Position>> {
        Ok(self.state().players.get(name).copied())
    }

    async fn find_container(
        &self,
        kinds: &[String],
        origin: Position,
        radius: f64,
    ) -> PortResult<Option<BlockPos>> {
        let state = self.state();
        let nearest = state
            .containers
            .iter()
            .filter(|(_, c)| kinds.contains(&c.kind))
            .map(|(at, _)| (origin.distance_to(&at.center()), *at))
            .filter(|(distance, _)| *distance <= radius)
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, at)| at);
        Ok(nearest)
    }
}

#[async_trait]
impl Movement for SimWorld {
    async fn goto(&self, target: Position, tolerance: f64) -> Result<(), MovementError> {
        let generation = {
            let mut state = self.state();
            state.movement_generation += 1;
            state.movement_generation
        };
        let step = self.walk_speed * Self::STEP.as_secs_f64();

        loop {
            {
                let mut state = self.state();
                if state.movement_generation != generation {
                    return Err(MovementError::Interrupted);
                }
                if let Some(reason) = &state.movement_failure {
                    return Err(MovementError::Failed(reason.clone()));
                }

                let remaining = state.position.distance_to(&target) - tolerance;
                if remaining <= ARRIVAL_EPSILON {
                    return Ok(());
                }

                let from = state.position;
                let distance = from.distance_to(&target);
                let advance = step.min(remaining) / distance;
                state.position = Position::new(
                    from.x + (target.x - from.x) * advance,
                    from.y + (target.y - from.y) * advance,
                    from.z + (target.z - from.z) * advance,
                );
            }
            tokio::time::sleep(Self::STEP).await;
        }
    }

    async fn cancel(&self) {
        self.state().movement_generation += 1;
    }
}

#[async_trait]
impl Combat for SimWorld {
    async fn attack(&self, target: EntityId) -> PortResult<()> {
        let mut state = self.state();
        if !state.entities.iter().any(|e| e.id == target) {
            return Err(PortError::Rejected(format!("no entity {target}")));
        }
        state.target = Some(target);
        state.counters.attacks += 1;
        Ok(())
    }

    async fn stop_attack(&self) -> PortResult<()> {
        self.state().target = None;
        Ok(())
    }

    async fn current_target(&self) -> Option<EntityId> {
        self.state().target
    }
}

#[async_trait]
impl Inventory for SimWorld {
    async fn snapshot(&self) -> PortResult<InventoryView> {
        Ok(InventoryView::new(self.inventory()))
    }

    async fn held_item(&self) -> PortResult<Option<ItemKind>> {
        let state = self.state();
        Ok(state
            .inventory
            .iter()
            .find(|s| s.slot == state.selected_slot)
            .map(|s| s.item.clone()))
    }

    async fn equip_to_hand(&self, slot: u16) -> PortResult<()> {
        let mut guard = self.state();
        let state = &mut *guard;
        if !state.inventory.iter().any(|s| s.slot == slot) {
            return Err(PortError::Rejected(format!("slot {slot} is empty")));
        }

        if SlotLayout::PLAYER_WINDOW.hotbar.contains(slot) {
            state.selected_slot = slot;
        } else {
            // Swap into the selected hotbar slot.
            let selected = state.selected_slot;
            for stack in state.inventory.iter_mut() {
                if stack.slot == slot {
                    stack.slot = selected;
                } else if stack.slot == selected {
                    stack.slot = slot;
                }
            }
        }
        state.counters.hand_equips += 1;
        Ok(())
    }

    async fn equip_best_armor(&self) -> PortResult<()> {
        let mut state = self.state();
        for (piece, armor_slot) in ARMOR_SLOTS {
            if state.inventory.iter().any(|s| s.slot == armor_slot) {
                continue;
            }
            if let Some(stack) = state.inventory.iter_mut().find(|s| {
                s.slot >= 9 && s.category() == ItemCategory::Armor(piece)
            }) {
                stack.slot = armor_slot;
            }
        }
        state.counters.armor_equips += 1;
        Ok(())
    }
}

#[async_trait]
impl Containers for SimWorld {
    async fn open(&self, at: BlockPos) -> PortResult<Box<dyn ContainerSession>> {
        {
            let mut state = self.state();
            if !state.containers.contains_key(&at) {
                return Err(PortError::Rejected(format!("no container at {at}")));
            }
            state.counters.container_opens += 1;
        }
        Ok(Box::new(SimSession::new(self.clone(), at)))
    }
}

#[async_trait]
impl AutoFeed for SimWorld {
    async fn enable(&self, settings: FeedSettings) -> PortResult<()> {
        self.state().feed = Some(settings);
        Ok(())
    }
}

#[async_trait]
impl ChatChannel for SimWorld {
    async fn say(&self, text: &str) -> PortResult<()> {
        self.state().chat_log.push(text.to_string());
        Ok(())
    }

    fn own_name(&self) -> &str {
        self.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunter_core::{ItemStack, WeaponClass};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn goto_walks_until_within_tolerance() {
        let world = SimWorld::builder().walk_speed(10.0).build();
        let target = Position::new(10.0, 64.0, 0.0);

        world.goto(target, 2.0).await.unwrap();

        let distance = world.position().distance_to(&target);
        assert!((distance - 2.0).abs() < 1e-3);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_pending_goto() {
        let world = SimWorld::builder().build();
        let walker = world.clone();
        let walk =
            tokio::spawn(async move { walker.goto(Position::new(100.0, 64.0, 0.0), 1.0).await });

        tokio::time::sleep(Duration::from_millis(200)).await;
        world.cancel().await;

        assert_eq!(walk.await.unwrap(), Err(MovementError::Interrupted));
    }

    #[tokio::test]
    async fn equip_from_main_inventory_swaps_into_hand() {
        let sword = ItemKind::new(1, "iron_sword", ItemCategory::Weapon(WeaponClass::Sword));
        let world = SimWorld::builder()
            .stack(ItemStack::new(12, sword.clone(), 1))
            .build();

        world.equip_to_hand(12).await.unwrap();

        assert_eq!(world.held_item().await.unwrap(), Some(sword));
        assert_eq!(world.counters().hand_equips, 1);
    }
}
