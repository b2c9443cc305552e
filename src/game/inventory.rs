//! # Inventory
//!
//! Quantity bookkeeping for the items a character carries.

use super::ItemId;
use crate::{RuneforgeError, RuneforgeResult};
use serde::{Deserialize, Serialize};

/// One stack of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub item_id: ItemId,
    pub quantity: u32,
    /// Grid pattern(s) that produced this item, comma-joined
    #[serde(default)]
    pub crafting_pattern: Option<String>,
}

/// Ordered list of item stacks, one per item id.
///
/// # Examples
///
/// ```
/// use runeforge::Inventory;
///
/// let mut inventory = Inventory::new();
/// inventory.add("herb", 3);
/// inventory.remove("herb", 3).unwrap();
/// assert!(inventory.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from `(item_id, quantity)` pairs.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        let mut inventory = Self::new();
        for (item_id, quantity) in pairs {
            inventory.add(item_id, quantity);
        }
        inventory
    }

    /// Adds items, merging into an existing stack.
    pub fn add(&mut self, item_id: &str, quantity: u32) {
        self.add_with_pattern(item_id, quantity, None);
    }

    /// Adds items and, when given, records the crafting pattern on the stack.
    pub fn add_with_pattern(&mut self, item_id: &str, quantity: u32, pattern: Option<String>) {
        if quantity == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.item_id == item_id) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(quantity);
                if pattern.is_some() {
                    entry.crafting_pattern = pattern;
                }
            }
            None => self.entries.push(InventoryEntry {
                item_id: item_id.to_string(),
                quantity,
                crafting_pattern: pattern,
            }),
        }
    }

    /// Removes items. The stack disappears when its quantity reaches zero.
    ///
    /// Fails without changing anything if fewer than `quantity` are held.
    pub fn remove(&mut self, item_id: &str, quantity: u32) -> RuneforgeResult<()> {
        let available = self.quantity_of(item_id);
        if available < quantity {
            return Err(RuneforgeError::InsufficientItems {
                item_id: item_id.to_string(),
                required: quantity,
                available,
            });
        }
        if quantity == 0 {
            return Ok(());
        }
        if let Some(index) = self.entries.iter().position(|e| e.item_id == item_id) {
            self.entries[index].quantity -= quantity;
            if self.entries[index].quantity == 0 {
                self.entries.remove(index);
            }
        }
        Ok(())
    }

    /// Quantity held of an item, zero when absent.
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.get(item_id).map(|e| e.quantity).unwrap_or(0)
    }

    /// Whether at least `quantity` of the item is held.
    pub fn has(&self, item_id: &str, quantity: u32) -> bool {
        self.quantity_of(item_id) >= quantity
    }

    /// The stack for an item, if any.
    pub fn get(&self, item_id: &str) -> Option<&InventoryEntry> {
        self.entries.iter().find(|e| e.item_id == item_id)
    }

    /// All stacks in insertion order.
    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    /// Whether the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges `(item_id, quantity)` pairs into the inventory.
    pub fn merge(&mut self, items: &[(ItemId, u32)]) {
        for (item_id, quantity) in items {
            self.add(item_id, *quantity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_merges_stacks() {
        let mut inventory = Inventory::new();
        inventory.add("iron", 2);
        inventory.add("iron", 3);
        assert_eq!(inventory.entries().len(), 1);
        assert_eq!(inventory.quantity_of("iron"), 5);
    }

    #[test]
    fn test_add_zero_is_noop() {
        let mut inventory = Inventory::new();
        inventory.add("iron", 0);
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_remove_to_zero_drops_entry() {
        let mut inventory = Inventory::from_pairs([("wood", 2), ("iron", 1)]);
        inventory.remove("wood", 2).unwrap();
        assert!(inventory.get("wood").is_none());
        assert_eq!(inventory.entries().len(), 1);
    }

    #[test]
    fn test_remove_more_than_held_fails_without_change() {
        let mut inventory = Inventory::from_pairs([("wood", 1)]);
        let err = inventory.remove("wood", 2).unwrap_err();
        assert!(matches!(
            err,
            RuneforgeError::InsufficientItems {
                required: 2,
                available: 1,
                ..
            }
        ));
        assert_eq!(inventory.quantity_of("wood"), 1);
    }

    #[test]
    fn test_pattern_tag_recorded() {
        let mut inventory = Inventory::new();
        inventory.add_with_pattern("iron_sword", 1, Some("linear,square".to_string()));
        inventory.add("iron_sword", 1);
        let entry = inventory.get("iron_sword").unwrap();
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.crafting_pattern.as_deref(), Some("linear,square"));
    }
}
