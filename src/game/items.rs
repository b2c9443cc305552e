//! # Items
//!
//! Immutable catalog entries and the read-only catalog they are looked up from.

use super::{EquipSlot, ItemId, Rarity};
use crate::{RuneforgeError, RuneforgeResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Broad item category. Pattern bonuses are keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Ingredient,
    Weapon,
    Armor,
    Potion,
    Tool,
    Magical,
    Accessory,
    Crafted,
}

/// An immutable catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub rarity: Rarity,
    /// Named stat bonuses, e.g. `"Attack" => 5`
    #[serde(default)]
    pub stats: BTreeMap<String, i32>,
    /// Slot this item can be equipped into
    #[serde(default)]
    pub slot: Option<EquipSlot>,
    /// Special ability tag resolved through the skill registry
    #[serde(default)]
    pub special_ability: Option<String>,
}

impl Item {
    /// Creates an item with no stats, slot or ability.
    pub fn new(id: &str, name: &str, item_type: ItemType, rarity: Rarity) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            item_type,
            rarity,
            stats: BTreeMap::new(),
            slot: None,
            special_ability: None,
        }
    }

    /// Adds a named stat bonus.
    pub fn with_stat(mut self, name: &str, amount: i32) -> Self {
        self.stats.insert(name.to_string(), amount);
        self
    }

    /// Makes the item equippable into `slot`.
    pub fn with_slot(mut self, slot: EquipSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    /// Attaches a special ability tag.
    pub fn with_ability(mut self, ability: &str) -> Self {
        self.special_ability = Some(ability.to_string());
        self
    }

    /// Value of a named stat, zero when absent.
    pub fn stat(&self, name: &str) -> i32 {
        self.stats.get(name).copied().unwrap_or(0)
    }

    /// Whether the item can be equipped.
    pub fn is_equippable(&self) -> bool {
        self.slot.is_some()
    }
}

/// Read-only lookup table of items by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: HashMap<ItemId, Item>,
}

impl ItemCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of items. Later duplicates replace earlier ones.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut catalog = Self::new();
        for item in items {
            catalog.insert(item);
        }
        catalog
    }

    /// Adds or replaces an item.
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    /// Looks up an item. Unknown ids are an error.
    pub fn get(&self, id: &str) -> RuneforgeResult<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| RuneforgeError::UnknownItem(id.to_string()))
    }

    /// Whether the catalog contains `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Iterates over all items in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
