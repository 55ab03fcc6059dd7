//! Snapshot types shared by every decision component.
//!
//! All of these are plain values: the runtime rebuilds them from the live
//! world each tick and nothing here keeps a reference to live state.

mod entity;
mod inventory;
mod item;
mod position;

pub use entity::{CategorySet, EntityCategory, EntityId, EntitySnapshot};
pub use inventory::{ContainerView, InventoryView, SlotLayout, SlotRange};
pub use item::{ArmorPiece, ItemCategory, ItemKind, ItemStack, TagData, ToolClass, WeaponClass};
pub use position::{BlockPos, Position};
