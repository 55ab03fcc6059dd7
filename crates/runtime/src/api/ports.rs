//! Collaborator interfaces the agent drives.
//!
//! Pathfinding, melee resolution and the server protocol live behind these
//! traits. The control loop only sees snapshots and completion results, so
//! any backend (a protocol client, the in-process simulation, a test double)
//! can be plugged in through [`Capabilities`].
use std::sync::Arc;

use async_trait::async_trait;
use hunter_core::{
    BlockPos, ContainerView, DepositRequest, EntityId, EntitySnapshot, InventoryView, ItemKind,
    Position, TransferError, WithdrawRequest,
};
use thiserror::Error;

pub type PortResult<T> = std::result::Result<T, PortError>;

/// Failure reported by a collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("not connected to the world")]
    Disconnected,

    #[error("request rejected: {0}")]
    Rejected(String),
}

/// Why a `goto` did not reach its goal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MovementError {
    /// Cancelled or superseded by a newer goal. Expected during normal play.
    #[error("movement interrupted")]
    Interrupted,

    #[error("movement failed: {0}")]
    Failed(String),
}

/// Read access to the world around the agent.
#[async_trait]
pub trait WorldView: Send + Sync {
    async fn self_position(&self) -> PortResult<Position>;

    /// Entities currently tracked by the client, in registry order.
    async fn entities(&self) -> PortResult<Vec<EntitySnapshot>>;

    /// Position of a named player, when that player is visible.
    async fn player_position(&self, name: &str) -> PortResult<Option<Position>>;

    /// Nearest block of one of `kinds` within `radius` of `origin`.
    async fn find_container(
        &self,
        kinds: &[String],
        origin: Position,
        radius: f64,
    ) -> PortResult<Option<BlockPos>>;
}

/// Goal-based pathfinding.
///
/// Starting a new goal supersedes the previous one, whose `goto` then
/// resolves to [`MovementError::Interrupted`].
#[async_trait]
pub trait Movement: Send + Sync {
    async fn goto(&self, target: Position, tolerance: f64) -> Result<(), MovementError>;

    async fn cancel(&self);
}

/// Melee engagement. The end of an engagement arrives separately, as an
/// agent message.
#[async_trait]
pub trait Combat: Send + Sync {
    async fn attack(&self, target: EntityId) -> PortResult<()>;

    async fn stop_attack(&self) -> PortResult<()>;

    async fn current_target(&self) -> Option<EntityId>;
}

#[async_trait]
pub trait Inventory: Send + Sync {
    async fn snapshot(&self) -> PortResult<InventoryView>;

    /// Item in the main hand, if any.
    async fn held_item(&self) -> PortResult<Option<ItemKind>>;

    /// Moves the stack in `slot` into the main hand.
    async fn equip_to_hand(&self, slot: u16) -> PortResult<()>;

    /// Wears the best available piece for every armor slot.
    async fn equip_best_armor(&self) -> PortResult<()>;
}

#[async_trait]
pub trait Containers: Send + Sync {
    async fn open(&self, at: BlockPos) -> PortResult<Box<dyn ContainerSession>>;
}

/// An open container window.
///
/// Requests are carried out one at a time. Callers must [`close`] the
/// session on every path, including after failed transfers.
///
/// [`close`]: ContainerSession::close
#[async_trait]
pub trait ContainerSession: Send {
    async fn view(&self) -> PortResult<ContainerView>;

    async fn withdraw(&mut self, request: &WithdrawRequest) -> Result<(), TransferError>;

    async fn deposit(&mut self, request: &DepositRequest) -> Result<(), TransferError>;

    async fn close(self: Box<Self>) -> PortResult<()>;
}

/// Eating policy handed to the auto-feed capability.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedSettings {
    pub min_hunger: u32,
    pub banned_foods: Vec<String>,
    /// Every item kind the catalog tags as food.
    pub foods: Vec<ItemKind>,
}

#[async_trait]
pub trait AutoFeed: Send + Sync {
    async fn enable(&self, settings: FeedSettings) -> PortResult<()>;
}

#[async_trait]
pub trait ChatChannel: Send + Sync {
    async fn say(&self, text: &str) -> PortResult<()>;

    /// The agent's own account name; its own messages are not commands.
    fn own_name(&self) -> &str;
}

/// Bundle of collaborator handles shared by the controller and its tasks.
#[derive(Clone)]
pub struct Capabilities {
    pub world: Arc<dyn WorldView>,
    pub movement: Arc<dyn Movement>,
    pub combat: Arc<dyn Combat>,
    pub inventory: Arc<dyn Inventory>,
    pub containers: Arc<dyn Containers>,
    pub feed: Arc<dyn AutoFeed>,
    pub chat: Arc<dyn ChatChannel>,
}

impl Capabilities {
    /// All capabilities served by one backend.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: WorldView + Movement + Combat + Inventory + Containers + AutoFeed + ChatChannel + 'static,
    {
        Self {
            world: backend.clone(),
            movement: backend.clone(),
            combat: backend.clone(),
            inventory: backend.clone(),
            containers: backend.clone(),
            feed: backend.clone(),
            chat: backend,
        }
    }
}
