//! Container transaction planning.
//!
//! Planning is pure: it reads a container view and an inventory view and
//! emits requests. The runtime executes a plan strictly in order and folds
//! each transfer into a [`BatchReport`]:
//!
//! - [`TransferError::DestinationFull`] stops the batch softly (partial result)
//! - any other [`TransferError`] stops the batch and fails the operation

mod deposit;
mod withdraw;

use std::num::NonZeroU32;

use thiserror::Error;

use crate::types::{ItemKind, ItemStack, TagData};

pub use deposit::plan_deposit;
pub use withdraw::{WithdrawPolicy, plan_withdraw};

/// Take `count` items out of container slot `slot`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawRequest {
    pub slot: u16,
    pub item: ItemKind,
    pub count: NonZeroU32,
    pub tag: Option<TagData>,
}

impl WithdrawRequest {
    /// `None` when `count` is zero.
    pub fn from_stack(stack: &ItemStack, count: u32) -> Option<Self> {
        Some(Self {
            slot: stack.slot,
            item: stack.item.clone(),
            count: NonZeroU32::new(count)?,
            tag: stack.tag.clone(),
        })
    }
}

/// Move the whole stack in agent inventory slot `slot` into the container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositRequest {
    pub slot: u16,
    pub item: ItemKind,
    pub count: NonZeroU32,
    pub tag: Option<TagData>,
}

impl DepositRequest {
    /// `None` for an empty stack.
    pub fn from_stack(stack: &ItemStack) -> Option<Self> {
        Some(Self {
            slot: stack.slot,
            item: stack.item.clone(),
            count: NonZeroU32::new(stack.count)?,
            tag: stack.tag.clone(),
        })
    }
}

/// Failure of a single transfer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The destination has no room left.
    #[error("destination is full")]
    DestinationFull,

    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Running tally of an executed plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub planned: usize,
    pub completed: usize,
    /// Total item count moved.
    pub items: u32,
    /// The batch stopped early because the destination filled up.
    pub stopped_full: bool,
}

impl BatchReport {
    pub fn new(planned: usize) -> Self {
        Self {
            planned,
            ..Self::default()
        }
    }

    pub fn record(&mut self, count: NonZeroU32) {
        self.completed += 1;
        self.items += count.get();
    }

    pub fn is_partial(&self) -> bool {
        self.completed < self.planned
    }
}
