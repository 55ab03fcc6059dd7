use std::ops::Range;

use async_trait::async_trait;
use hunter_core::{
    BlockPos, ContainerView, DepositRequest, ItemKind, ItemStack, SlotLayout, TagData,
    TransferError, WithdrawRequest,
};

use super::{MAX_STACK, SimWorld};
use crate::api::{ContainerSession, PortError, PortResult};

/// Where incoming items land in the agent's inventory: hotbar first.
const AGENT_SLOTS: [Range<u16>; 2] = [36..45, 9..36];

/// A storage block in the simulated world.
#[derive(Clone, Debug, PartialEq)]
pub struct SimContainer {
    pub kind: String,
    pub stacks: Vec<ItemStack>,
    pub capacity: u16,
    /// When set, every transfer fails with this reason.
    pub reject: Option<String>,
}

impl SimContainer {
    pub const CHEST_SLOTS: u16 = 27;

    pub fn new(kind: impl Into<String>, stacks: Vec<ItemStack>) -> Self {
        Self {
            kind: kind.into(),
            stacks,
            capacity: Self::CHEST_SLOTS,
            reject: None,
        }
    }

    pub fn chest(stacks: Vec<ItemStack>) -> Self {
        Self::new("chest", stacks)
    }

    pub fn with_capacity(mut self, capacity: u16) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Puts `count` items into the first slot that takes them whole.
///
/// Returns false, leaving `stacks` untouched, when nothing fits.
fn place(
    stacks: &mut Vec<ItemStack>,
    slots: &[Range<u16>],
    item: &ItemKind,
    count: u32,
    tag: &Option<TagData>,
) -> bool {
    let in_range = |slot: u16| slots.iter().any(|r| r.contains(&slot));

    if let Some(stack) = stacks.iter_mut().find(|s| {
        in_range(s.slot) && s.item.id == item.id && &s.tag == tag && s.count + count <= MAX_STACK
    }) {
        stack.count += count;
        return true;
    }

    let free = slots
        .iter()
        .flat_map(|r| r.clone())
        .find(|slot| !stacks.iter().any(|s| s.slot == *slot));

    match free {
        Some(slot) => {
            let mut stack = ItemStack::new(slot, item.clone(), count);
            stack.tag = tag.clone();
            stacks.push(stack);
            true
        }
        None => false,
    }
}

/// Removes up to `count` of `item` from `slot`, returning how many were taken.
fn take(stacks: &mut Vec<ItemStack>, slot: u16, item: &ItemKind, count: u32) -> Option<u32> {
    let index = stacks
        .iter()
        .position(|s| s.slot == slot && s.item.id == item.id)?;
    let taken = count.min(stacks[index].count);
    stacks[index].count -= taken;
    if stacks[index].count == 0 {
        stacks.remove(index);
    }
    Some(taken)
}

pub(super) struct SimSession {
    world: SimWorld,
    at: BlockPos,
}

impl SimSession {
    pub(super) fn new(world: SimWorld, at: BlockPos) -> Self {
        Self { world, at }
    }
}

#[async_trait]
impl ContainerSession for SimSession {
    async fn view(&self) -> PortResult<ContainerView> {
        let state = self.world.state();
        let container = state
            .containers
            .get(&self.at)
            .ok_or_else(|| PortError::Rejected(format!("no container at {}", self.at)))?;
        Ok(ContainerView::new(
            container.stacks.clone(),
            SlotLayout::PLAYER_WINDOW,
        ))
    }

    async fn withdraw(&mut self, request: &WithdrawRequest) -> Result<(), TransferError> {
        let mut guard = self.world.state();
        let state = &mut *guard;
        let container = state
            .containers
            .get_mut(&self.at)
            .ok_or_else(|| TransferError::Rejected("container is gone".into()))?;
        if let Some(reason) = &container.reject {
            return Err(TransferError::Rejected(reason.clone()));
        }

        let available = container
            .stacks
            .iter()
            .find(|s| s.slot == request.slot && s.item.id == request.item.id)
            .map(|s| s.count.min(request.count.get()))
            .ok_or_else(|| {
                TransferError::Rejected(format!("slot {} has no {}", request.slot, request.item))
            })?;

        if !place(
            &mut state.inventory,
            &AGENT_SLOTS,
            &request.item,
            available,
            &request.tag,
        ) {
            return Err(TransferError::DestinationFull);
        }
        take(&mut container.stacks, request.slot, &request.item, available);
        state.counters.transfers += 1;
        Ok(())
    }

    async fn deposit(&mut self, request: &DepositRequest) -> Result<(), TransferError> {
        let mut guard = self.world.state();
        let state = &mut *guard;
        let container = state
            .containers
            .get_mut(&self.at)
            .ok_or_else(|| TransferError::Rejected("container is gone".into()))?;
        if let Some(reason) = &container.reject {
            return Err(TransferError::Rejected(reason.clone()));
        }

        let held = state
            .inventory
            .iter()
            .find(|s| s.slot == request.slot && s.item.id == request.item.id)
            .map(|s| s.count.min(request.count.get()))
            .ok_or_else(|| {
                TransferError::Rejected(format!("slot {} has no {}", request.slot, request.item))
            })?;

        let capacity = [0..container.capacity];
        if !place(
            &mut container.stacks,
            &capacity,
            &request.item,
            held,
            &request.tag,
        ) {
            return Err(TransferError::DestinationFull);
        }
        take(&mut state.inventory, request.slot, &request.item, held);
        state.counters.transfers += 1;
        Ok(())
    }

    async fn close(self: Box<Self>) -> PortResult<()> {
        self.world.state().counters.container_closes += 1;
        Ok(())
    }
}
