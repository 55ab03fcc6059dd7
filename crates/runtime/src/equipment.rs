//! Weapon equip for an engagement.

use hunter_core::{ItemKind, best_weapon};
use tracing::{debug, info};

use crate::api::{Inventory, PortResult};

/// What [`equip_weapon`] ended up doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WeaponChoice {
    Equipped(ItemKind),
    /// The preferred weapon was already in hand; no equip was issued.
    AlreadyHeld(ItemKind),
    BareHands,
}

/// Puts the most preferred weapon in the main hand.
///
/// Idempotent: when the held item is already the chosen kind nothing is sent
/// to the inventory.
pub async fn equip_weapon(inventory: &dyn Inventory) -> PortResult<WeaponChoice> {
    let view = inventory.snapshot().await?;
    let Some(stack) = best_weapon(&view) else {
        debug!("No weapon, using fists");
        return Ok(WeaponChoice::BareHands);
    };

    if inventory.held_item().await?.as_ref() == Some(&stack.item) {
        return Ok(WeaponChoice::AlreadyHeld(stack.item.clone()));
    }

    inventory.equip_to_hand(stack.slot).await?;
    info!(weapon = %stack.item, slot = stack.slot, "Equipped weapon");
    Ok(WeaponChoice::Equipped(stack.item.clone()))
}
