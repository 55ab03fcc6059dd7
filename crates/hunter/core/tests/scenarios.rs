//! End-to-end decision scenarios over plain snapshots.

use hunter_core::{
    AgentConfig, AgentMode, AnchorChange, ContainerView, EntityCategory, EntityId, EntitySnapshot,
    InventoryView, ItemCategory, ItemKind, ItemStack, ModeCommand, Position, SearchArea,
    SlotLayout, TargetContext, WeaponClass, WithdrawPolicy, best_weapon, nearest_target,
    plan_deposit, plan_withdraw,
};

fn mob(id: u32, category: EntityCategory, name: &str, x: f64, z: f64) -> EntitySnapshot {
    EntitySnapshot::new(EntityId(id), category, Position::new(x, 64.0, z), name)
}

#[test]
fn guard_only_engages_inside_both_radii() {
    let config = AgentConfig::default();
    let ctx = TargetContext::from(&config);
    let anchor = Position::new(0.0, 64.0, 0.0);
    let agent = Position::new(2.0, 64.0, 0.0);

    // 20 blocks from the anchor: outside the guard radius.
    let far = vec![mob(1, EntityCategory::Hostile, "zombie", 20.0, 0.0)];
    let area = SearchArea::around(agent, config.engagement_radius)
        .guarding(anchor, config.guard_radius);
    assert!(nearest_target(&far, &ctx, &area).is_none());

    // Same zombie at 10 blocks is engaged.
    let near = vec![mob(1, EntityCategory::Hostile, "zombie", 10.0, 0.0)];
    assert_eq!(nearest_target(&near, &ctx, &area).map(|e| e.id), Some(EntityId(1)));
}

#[test]
fn players_props_and_swimmers_are_ignored_even_when_closest() {
    let config = AgentConfig::default();
    let ctx = TargetContext::from(&config);
    let agent = Position::new(0.0, 64.0, 0.0);
    let entities = vec![
        mob(1, EntityCategory::Player, "Steve", 1.0, 0.0),
        mob(2, EntityCategory::Object, "armor_stand", 1.5, 0.0),
        mob(3, EntityCategory::Animal, "cow", 2.0, 0.0).submerged(true),
        mob(4, EntityCategory::Passive, "villager", 9.0, 0.0),
    ];

    let target = nearest_target(&entities, &ctx, &SearchArea::around(agent, 32.0));
    assert_eq!(target.map(|e| e.id), Some(EntityId(4)));
}

#[test]
fn guard_then_stop_leaves_nothing_to_restore() {
    let post = Position::new(5.0, 70.0, 5.0);
    let guard = AgentMode::Idle.transition(ModeCommand::Guard { at: post });
    let mut stored = match guard.anchor {
        AnchorChange::Store(at) => Some(at),
        _ => None,
    };
    assert_eq!(stored, Some(post));

    let stop = guard.mode.transition(ModeCommand::Stop);
    if stop.anchor == AnchorChange::Clear {
        stored = None;
    }

    // A restart only restores an anchor when one is stored.
    let restored = stored
        .map(|anchor| AgentMode::Idle.transition(ModeCommand::Restore { anchor }).mode)
        .unwrap_or_default();
    assert_eq!(restored, AgentMode::Idle);
}

#[test]
fn restock_then_deposit_round() {
    let beef = ItemKind::new(1, "cooked_beef", ItemCategory::Food);
    let sword = ItemKind::new(2, "iron_sword", ItemCategory::Weapon(WeaponClass::Sword));
    let bone = ItemKind::new(3, "bone", ItemCategory::Other);

    let container = ContainerView::new(
        vec![ItemStack::new(0, beef.clone(), 20), ItemStack::new(1, sword.clone(), 1)],
        SlotLayout::PLAYER_WINDOW,
    );
    let inventory = InventoryView::new(vec![
        ItemStack::new(36, beef.clone(), 3),
        ItemStack::new(15, bone.clone(), 12),
    ]);

    let withdraw = plan_withdraw(&container, &inventory, &WithdrawPolicy::default());
    assert_eq!(withdraw.len(), 2);
    assert_eq!((withdraw[0].item.clone(), withdraw[0].count.get()), (beef, 13));
    assert_eq!(withdraw[1].item, sword);

    let deposit = plan_deposit(&inventory, &SlotLayout::PLAYER_WINDOW);
    assert_eq!(deposit.len(), 1);
    assert_eq!(deposit[0].item, bone);

    let armed = InventoryView::new(vec![ItemStack::new(37, sword, 1)]);
    assert_eq!(best_weapon(&armed).map(|s| s.slot), Some(37));
}
