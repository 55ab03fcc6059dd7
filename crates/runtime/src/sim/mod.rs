//! In-process world that implements every collaborator interface.
//!
//! `SimWorld` stands in for a protocol client: it tracks the agent's position,
//! the entity registry, the inventory and nearby containers, and serves them
//! through the port traits. Tests script it through the builder and the
//! helper methods; the offline client session runs the agent against it.
//!
//! Movement walks in fixed steps on the tokio clock, so paused-time tests
//! control it completely.

mod container;
mod ports;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use hunter_core::{BlockPos, EntityId, EntitySnapshot, ItemStack, Position};

use crate::api::FeedSettings;

pub use container::SimContainer;

/// Slot the hand selects until something else is equipped.
const FIRST_HOTBAR_SLOT: u16 = 36;

/// Largest count a single slot holds.
pub const MAX_STACK: u32 = 64;

/// Call counts, for asserting on side effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimCounters {
    pub hand_equips: u32,
    pub armor_equips: u32,
    pub attacks: u32,
    pub container_opens: u32,
    pub container_closes: u32,
    pub transfers: u32,
}

struct SimState {
    position: Position,
    entities: Vec<EntitySnapshot>,
    players: HashMap<String, Position>,
    inventory: Vec<ItemStack>,
    selected_slot: u16,
    containers: HashMap<BlockPos, SimContainer>,
    target: Option<EntityId>,
    movement_generation: u64,
    movement_failure: Option<String>,
    chat_log: Vec<String>,
    feed: Option<FeedSettings>,
    counters: SimCounters,
}

/// Simulated world backend. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SimWorld {
    name: Arc<str>,
    walk_speed: f64,
    state: Arc<Mutex<SimState>>,
}

impl SimWorld {
    pub const STEP: Duration = Duration::from_millis(50);

    pub fn builder() -> SimWorldBuilder {
        SimWorldBuilder::new()
    }

    fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Position {
        self.state().position
    }

    pub fn set_position(&self, position: Position) {
        self.state().position = position;
    }

    pub fn spawn(&self, entity: EntitySnapshot) {
        self.state().entities.push(entity);
    }

    pub fn despawn(&self, id: EntityId) {
        self.state().entities.retain(|e| e.id != id);
    }

    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.state().entities.iter().map(|e| e.id).collect()
    }

    pub fn move_player(&self, name: &str, position: Position) {
        self.state().players.insert(name.to_string(), position);
    }

    pub fn inventory(&self) -> Vec<ItemStack> {
        let mut stacks = self.state().inventory.clone();
        stacks.sort_by_key(|s| s.slot);
        stacks
    }

    /// Name of the item in the main hand.
    pub fn held_item_name(&self) -> Option<String> {
        let state = self.state();
        state
            .inventory
            .iter()
            .find(|s| s.slot == state.selected_slot)
            .map(|s| s.item.name.clone())
    }

    pub fn container_stacks(&self, at: BlockPos) -> Vec<ItemStack> {
        self.state()
            .containers
            .get(&at)
            .map(|c| c.stacks.clone())
            .unwrap_or_default()
    }

    /// Makes every transfer with the container at `at` fail hard.
    pub fn reject_transfers(&self, at: BlockPos, reason: Option<String>) {
        if let Some(container) = self.state().containers.get_mut(&at) {
            container.reject = reason;
        }
    }

    /// Makes every movement fail with `reason` until reset with `None`.
    pub fn fail_movement(&self, reason: Option<String>) {
        self.state().movement_failure = reason;
    }

    pub fn current_target(&self) -> Option<EntityId> {
        self.state().target
    }

    /// Ends the current fight: the target dies and the agent stands where it fell.
    ///
    /// Returns the defeated entity. The caller is responsible for telling the
    /// agent that it stopped attacking.
    pub fn resolve_combat(&self) -> Option<EntityId> {
        let mut state = self.state();
        let target = state.target.take()?;
        if let Some(index) = state.entities.iter().position(|e| e.id == target) {
            let fallen = state.entities.remove(index);
            state.position = fallen.position;
        }
        Some(target)
    }

    /// Everything the agent said, oldest first.
    pub fn said(&self) -> Vec<String> {
        self.state().chat_log.clone()
    }

    pub fn feed_settings(&self) -> Option<FeedSettings> {
        self.state().feed.clone()
    }

    pub fn counters(&self) -> SimCounters {
        self.state().counters
    }
}

/// Scripted setup for a [`SimWorld`].
pub struct SimWorldBuilder {
    name: String,
    walk_speed: f64,
    position: Position,
    entities: Vec<EntitySnapshot>,
    players: HashMap<String, Position>,
    inventory: Vec<ItemStack>,
    containers: HashMap<BlockPos, SimContainer>,
}

impl SimWorldBuilder {
    /// Blocks per second, roughly a walking player.
    pub const DEFAULT_WALK_SPEED: f64 = 4.3;

    fn new() -> Self {
        Self {
            name: "hunter".to_string(),
            walk_speed: Self::DEFAULT_WALK_SPEED,
            position: Position::new(0.0, 64.0, 0.0),
            entities: Vec::new(),
            players: HashMap::new(),
            inventory: Vec::new(),
            containers: HashMap::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn walk_speed(mut self, blocks_per_second: f64) -> Self {
        self.walk_speed = blocks_per_second;
        self
    }

    pub fn entity(mut self, entity: EntitySnapshot) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn player(mut self, name: impl Into<String>, position: Position) -> Self {
        self.players.insert(name.into(), position);
        self
    }

    pub fn stack(mut self, stack: ItemStack) -> Self {
        self.inventory.push(stack);
        self
    }

    pub fn container(mut self, at: BlockPos, container: SimContainer) -> Self {
        self.containers.insert(at, container);
        self
    }

    pub fn build(self) -> SimWorld {
        SimWorld {
            name: Arc::from(self.name),
            walk_speed: self.walk_speed.max(f64::EPSILON),
            state: Arc::new(Mutex::new(SimState {
                position: self.position,
                entities: self.entities,
                players: self.players,
                inventory: self.inventory,
                selected_slot: FIRST_HOTBAR_SLOT,
                containers: self.containers,
                target: None,
                movement_generation: 0,
                movement_failure: None,
                chat_log: Vec::new(),
                feed: None,
                counters: SimCounters::default(),
            })),
        }
    }
}
