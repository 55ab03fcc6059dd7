//! Restock and deposit transactions run end to end against a simulated world.

use std::sync::Arc;
use std::time::Duration;

use hunter_content::ItemCatalog;
use hunter_core::{
    AgentConfig, BlockPos, EntityCategory, EntityId, EntitySnapshot, ItemStack, Position,
};
use runtime::{
    Agent, AgentError, AgentHandle, BUSY_MESSAGE, Capabilities, NO_CONTAINER_MESSAGE,
    OperationError, OperationKind, RuntimeConfig, SimContainer, SimWorld, TickOutcome,
};

const CHEST: BlockPos = BlockPos::new(6, 64, 0);

fn catalog() -> ItemCatalog {
    ItemCatalog::builtin().expect("builtin catalog parses")
}

fn stack(catalog: &ItemCatalog, slot: u16, name: &str, count: u32) -> ItemStack {
    catalog
        .stack(slot, name, count)
        .unwrap_or_else(|| panic!("{name} is in the catalog"))
}

async fn start(world: &SimWorld) -> (Agent, AgentHandle) {
    let agent = Agent::builder()
        .config(RuntimeConfig::manual(AgentConfig::default()))
        .capabilities(Capabilities::from_backend(Arc::new(world.clone())))
        .catalog(catalog())
        .build()
        .await
        .expect("agent builds");
    let handle = agent.handle();
    // The first reply comes after the spawn routine has run.
    handle.status().await.expect("controller is running");
    (agent, handle)
}

fn count_of(stacks: &[ItemStack], name: &str) -> u32 {
    stacks
        .iter()
        .filter(|s| s.item.name == name)
        .map(|s| s.count)
        .sum()
}

#[tokio::test(start_paused = true)]
async fn restock_tops_food_up_to_threshold() {
    let items = catalog();
    let world = SimWorld::builder()
        .stack(stack(&items, 36, "cooked_beef", 3))
        .container(
            CHEST,
            SimContainer::chest(vec![stack(&items, 0, "cooked_beef", 20)]),
        )
        .build();
    let (agent, handle) = start(&world).await;

    let report = handle
        .run_operation(OperationKind::Restock)
        .await
        .expect("restock succeeds");

    assert_eq!(report.batch.completed, 1);
    assert_eq!(report.batch.items, 13);
    assert_eq!(count_of(&world.inventory(), "cooked_beef"), 16);
    assert_eq!(count_of(&world.container_stacks(CHEST), "cooked_beef"), 7);
    assert_eq!(
        world.said(),
        vec![
            "Moving to chest to take supplies...",
            "Chest opened. Taking supplies...",
            "Supplies taken.",
        ]
    );

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn restock_skips_banned_food_and_equips_armor() {
    let items = catalog();
    let world = SimWorld::builder()
        .container(
            CHEST,
            SimContainer::chest(vec![
                stack(&items, 0, "rotten_flesh", 30),
                stack(&items, 1, "iron_sword", 1),
                stack(&items, 2, "stone_sword", 1),
                stack(&items, 3, "iron_helmet", 1),
            ]),
        )
        .build();
    let (agent, handle) = start(&world).await;
    let armor_equips_at_spawn = world.counters().armor_equips;

    let report = handle.run_operation(OperationKind::Restock).await.unwrap();

    assert!(report.armor_withdrawn);
    assert_eq!(report.batch.planned, 2);
    let inventory = world.inventory();
    assert_eq!(count_of(&inventory, "rotten_flesh"), 0);
    assert_eq!(count_of(&inventory, "iron_sword"), 1);
    assert_eq!(count_of(&inventory, "stone_sword"), 0);
    assert!(inventory.iter().any(|s| s.slot == 5 && s.item.name == "iron_helmet"));
    assert_eq!(world.counters().armor_equips, armor_equips_at_spawn + 1);

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn deposit_keeps_hotbar_and_armor() {
    let items = catalog();
    let world = SimWorld::builder()
        .stack(stack(&items, 5, "iron_helmet", 1))
        .stack(stack(&items, 12, "bone", 9))
        .stack(stack(&items, 20, "string", 4))
        .stack(stack(&items, 36, "iron_sword", 1))
        .container(CHEST, SimContainer::chest(vec![]))
        .build();
    let (agent, handle) = start(&world).await;

    let report = handle.run_operation(OperationKind::Deposit).await.unwrap();

    assert_eq!(report.batch.completed, 2);
    assert!(!report.is_partial());
    let kept: Vec<u16> = world.inventory().iter().map(|s| s.slot).collect();
    assert_eq!(kept, vec![5, 36]);
    assert_eq!(count_of(&world.container_stacks(CHEST), "bone"), 9);
    assert_eq!(world.said().last().map(String::as_str), Some("Loot deposited."));

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn full_container_ends_deposit_early() {
    let items = catalog();
    let world = SimWorld::builder()
        .stack(stack(&items, 12, "bone", 9))
        .stack(stack(&items, 13, "string", 4))
        .container(CHEST, SimContainer::chest(vec![]).with_capacity(1))
        .build();
    let (agent, handle) = start(&world).await;

    let report = handle.run_operation(OperationKind::Deposit).await.unwrap();

    assert!(report.is_partial());
    assert_eq!(report.batch.planned, 2);
    assert_eq!(report.batch.completed, 1);
    assert_eq!(count_of(&world.inventory(), "string"), 4);
    let counters = world.counters();
    assert_eq!(counters.container_opens, counters.container_closes);
    assert!(!handle.status().await.unwrap().busy);

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn rejected_transfer_fails_and_closes_container() {
    let items = catalog();
    let world = SimWorld::builder()
        .stack(stack(&items, 12, "bone", 9))
        .container(CHEST, SimContainer::chest(vec![]))
        .build();
    world.reject_transfers(CHEST, Some("window desync".into()));
    let (agent, handle) = start(&world).await;

    let result = handle.run_operation(OperationKind::Deposit).await;

    assert!(matches!(
        result,
        Err(AgentError::Operation(OperationError::Transfer(_)))
    ));
    let counters = world.counters();
    assert_eq!(counters.container_opens, 1);
    assert_eq!(counters.container_closes, 1);
    assert_eq!(
        world.said().last().map(String::as_str),
        Some("Failed to deposit loot.")
    );
    assert!(!handle.status().await.unwrap().busy);

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn missing_container_is_reported() {
    let world = SimWorld::builder()
        .container(BlockPos::new(200, 64, 0), SimContainer::chest(vec![]))
        .build();
    let (agent, handle) = start(&world).await;

    let result = handle.run_operation(OperationKind::Restock).await;

    assert!(matches!(
        result,
        Err(AgentError::Operation(OperationError::NoContainer))
    ));
    assert_eq!(world.said(), vec![NO_CONTAINER_MESSAGE]);
    assert_eq!(world.counters().container_opens, 0);

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn second_operation_is_refused_while_first_runs() {
    let items = catalog();
    let world = SimWorld::builder()
        .stack(stack(&items, 12, "bone", 9))
        .container(
            BlockPos::new(20, 64, 0),
            SimContainer::chest(vec![stack(&items, 0, "bread", 16)]),
        )
        .build();
    let (agent, handle) = start(&world).await;

    let (restock, deposit) = tokio::join!(
        handle.run_operation(OperationKind::Restock),
        handle.run_operation(OperationKind::Deposit),
    );

    assert_eq!(
        [restock.is_ok(), deposit.is_ok()].iter().filter(|ok| **ok).count(),
        1
    );
    assert!(matches!(
        restock.err().or(deposit.err()),
        Some(AgentError::Operation(OperationError::Busy))
    ));
    assert_eq!(world.counters().container_opens, 1);

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn chat_request_during_combat_is_refused() {
    let items = catalog();
    let zombie = EntitySnapshot::new(
        EntityId(7),
        EntityCategory::Hostile,
        Position::new(5.0, 64.0, 0.0),
        "zombie",
    );
    let world = SimWorld::builder()
        .entity(zombie)
        .stack(stack(&items, 12, "bone", 9))
        .container(CHEST, SimContainer::chest(vec![]))
        .build();
    let (agent, handle) = start(&world).await;

    handle.chat("Steve", "hunt").await.unwrap();
    assert_eq!(handle.tick().await.unwrap(), TickOutcome::Engaged(EntityId(7)));

    handle.chat("Steve", "deposit").await.unwrap();
    let status = handle.status().await.unwrap();

    assert!(!status.busy);
    assert_eq!(world.counters().container_opens, 0);
    assert_eq!(
        world.said(),
        vec!["Hunting mode activated!", "Depositing loot...", BUSY_MESSAGE]
    );

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(count_of(&world.inventory(), "bone"), 9);

    agent.shutdown("test over").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stop_on_the_way_cancels_without_failing() {
    let items = catalog();
    let world = SimWorld::builder()
        .container(
            BlockPos::new(20, 64, 0),
            SimContainer::chest(vec![stack(&items, 0, "bread", 16)]),
        )
        .build();
    let (agent, handle) = start(&world).await;

    let restock = tokio::spawn({
        let handle = handle.clone();
        async move { handle.run_operation(OperationKind::Restock).await }
    });
    tokio::time::sleep(Duration::from_millis(500)).await;
    handle.chat("Steve", "stop").await.unwrap();

    let result = restock.await.unwrap();
    assert!(matches!(
        result,
        Err(AgentError::Operation(OperationError::Interrupted))
    ));
    assert_eq!(
        world.said(),
        vec![
            "Moving to chest to take supplies...",
            "Stopped hunting.",
            "Restock cancelled.",
        ]
    );
    assert_eq!(world.counters().container_opens, 0);
    assert!(!handle.status().await.unwrap().busy);

    agent.shutdown("test over").await.unwrap();
}
