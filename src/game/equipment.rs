//! # Equipment
//!
//! Typed equipment slots. A slot is either empty or holds one item id; rings live in a
//! vector whose length is the configured ring capacity.

use super::{Character, Inventory, ItemCatalog, ItemId};
use crate::{RuneforgeError, RuneforgeResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Item id of the ring that unlocks the curse crafting control.
pub const CURSED_RING_ID: &str = "cursed_ring";

/// Equipment slot an item can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipSlot {
    Head,
    Chest,
    Legs,
    Feet,
    Hands,
    Weapon,
    Offhand,
    Neck,
    Ring,
}

impl EquipSlot {
    /// The eight single-item slots (everything but rings).
    pub fn fixed() -> [EquipSlot; 8] {
        [
            EquipSlot::Head,
            EquipSlot::Chest,
            EquipSlot::Legs,
            EquipSlot::Feet,
            EquipSlot::Hands,
            EquipSlot::Weapon,
            EquipSlot::Offhand,
            EquipSlot::Neck,
        ]
    }
}

/// Addresses one concrete slot, including a specific ring index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotRef {
    Fixed(EquipSlot),
    Ring(usize),
}

/// The items a character is wearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    slots: BTreeMap<EquipSlot, ItemId>,
    rings: Vec<Option<ItemId>>,
}

impl Equipment {
    /// Creates empty equipment with `ring_slots` ring slots.
    pub fn new(ring_slots: usize) -> Self {
        Self {
            slots: BTreeMap::new(),
            rings: vec![None; ring_slots],
        }
    }

    /// Item in a slot, if any.
    pub fn get(&self, slot: SlotRef) -> Option<&ItemId> {
        match slot {
            SlotRef::Fixed(EquipSlot::Ring) => self.rings.first().and_then(|r| r.as_ref()),
            SlotRef::Fixed(slot) => self.slots.get(&slot),
            SlotRef::Ring(index) => self.rings.get(index).and_then(|r| r.as_ref()),
        }
    }

    /// Ring slot capacity.
    pub fn ring_capacity(&self) -> usize {
        self.rings.len()
    }

    /// All ring slots in order.
    pub fn rings(&self) -> &[Option<ItemId>] {
        &self.rings
    }

    /// Every equipped item id with its slot, fixed slots first then rings.
    pub fn equipped(&self) -> Vec<(SlotRef, &ItemId)> {
        let fixed = self
            .slots
            .iter()
            .map(|(slot, id)| (SlotRef::Fixed(*slot), id));
        let rings = self
            .rings
            .iter()
            .enumerate()
            .filter_map(|(index, ring)| ring.as_ref().map(|id| (SlotRef::Ring(index), id)));
        fixed.chain(rings).collect()
    }

    /// Whether an item id is equipped anywhere.
    pub fn is_equipped(&self, item_id: &str) -> bool {
        self.equipped().iter().any(|(_, id)| id.as_str() == item_id)
    }

    /// Whether the cursed ring is worn.
    pub fn has_cursed_ring(&self) -> bool {
        self.rings
            .iter()
            .any(|ring| ring.as_deref() == Some(CURSED_RING_ID))
    }

    /// Puts an item into a slot, returning whatever was there.
    fn put(&mut self, slot: SlotRef, item_id: ItemId) -> RuneforgeResult<Option<ItemId>> {
        match slot {
            SlotRef::Fixed(EquipSlot::Ring) => self.put(SlotRef::Ring(0), item_id),
            SlotRef::Fixed(slot) => Ok(self.slots.insert(slot, item_id)),
            SlotRef::Ring(index) => {
                let ring = self.rings.get_mut(index).ok_or_else(|| {
                    RuneforgeError::InvalidAction(format!("No ring slot {}", index))
                })?;
                Ok(ring.replace(item_id))
            }
        }
    }

    /// Empties a slot, returning its item.
    fn take(&mut self, slot: SlotRef) -> Option<ItemId> {
        match slot {
            SlotRef::Fixed(EquipSlot::Ring) => self.take(SlotRef::Ring(0)),
            SlotRef::Fixed(slot) => self.slots.remove(&slot),
            SlotRef::Ring(index) => self.rings.get_mut(index).and_then(|r| r.take()),
        }
    }

    /// Slot a new item of `slot` type should go into.
    fn target_for(&self, slot: EquipSlot) -> RuneforgeResult<SlotRef> {
        if slot != EquipSlot::Ring {
            return Ok(SlotRef::Fixed(slot));
        }
        if self.rings.is_empty() {
            return Err(RuneforgeError::InvalidAction(
                "No ring slots available".to_string(),
            ));
        }
        Ok(SlotRef::Ring(
            self.rings.iter().position(|r| r.is_none()).unwrap_or(0),
        ))
    }
}

impl Default for Equipment {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_RING_SLOTS)
    }
}

/// Moves one item from the inventory into its equipment slot.
///
/// Rings go into the first empty ring slot, or replace ring 0 when all are full. Anything
/// displaced is returned to the inventory. Returns the slot used and the displaced item id.
pub fn equip_item(
    character: &mut Character,
    inventory: &mut Inventory,
    catalog: &ItemCatalog,
    item_id: &str,
) -> RuneforgeResult<(SlotRef, Option<ItemId>)> {
    let item = catalog.get(item_id)?;
    let slot = item.slot.ok_or_else(|| {
        RuneforgeError::InvalidAction(format!("{} cannot be equipped", item.name))
    })?;
    let target = character.equipment.target_for(slot)?;

    inventory.remove(item_id, 1)?;
    let displaced = character.equipment.put(target, item_id.to_string())?;
    if let Some(previous) = &displaced {
        inventory.add(previous, 1);
    }

    debug!("{} equipped {} into {:?}", character.name, item_id, target);
    Ok((target, displaced))
}

/// Empties a slot and returns its item to the inventory.
///
/// Returns the removed item id, or None if the slot was already empty.
pub fn unequip_item(
    character: &mut Character,
    inventory: &mut Inventory,
    slot: SlotRef,
) -> Option<ItemId> {
    let item_id = character.equipment.take(slot)?;
    inventory.add(&item_id, 1);
    debug!("{} unequipped {} from {:?}", character.name, item_id, slot);
    Some(item_id)
}
