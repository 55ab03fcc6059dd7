//! Decision logic for the hunter agent, free of I/O.
//!
//! `hunter-core` holds everything the agent decides from snapshots alone:
//! which entities are valid targets, which weapon to hold, what to move
//! between inventory and a storage container, and how chat commands change
//! the agent's mode. The runtime crate feeds these functions fresh snapshots
//! on every tick and carries out the resulting effects.
pub mod command;
pub mod config;
pub mod equipment;
pub mod mode;
pub mod planner;
pub mod targeting;
pub mod types;

pub use command::ChatCommand;
pub use config::{AgentConfig, IdlePolicy};
pub use equipment::{WEAPON_PREFERENCE, best_weapon};
pub use mode::{AgentMode, AnchorChange, ModeCommand, Transition};
pub use planner::{
    BatchReport, DepositRequest, TransferError, WithdrawPolicy, WithdrawRequest, plan_deposit,
    plan_withdraw,
};
pub use targeting::{SearchArea, TargetContext, is_valid_target, nearest_target};
pub use types::{
    ArmorPiece, BlockPos, CategorySet, ContainerView, EntityCategory, EntityId, EntitySnapshot,
    InventoryView, ItemCategory, ItemKind, ItemStack, Position, SlotLayout, SlotRange, TagData,
    ToolClass, WeaponClass,
};
