//! # Crafting Module
//!
//! The 3x3 crafting grid, its geometric pattern analysis, recipe matching and the
//! resolver that turns a filled grid into an item.
//!
//! Grid cells are indexed row by row:
//!
//! ```text
//! 0 1 2
//! 3 4 5
//! 6 7 8
//! ```

pub mod discovery;
pub mod patterns;
pub mod recipes;
pub mod resolver;

pub use discovery::*;
pub use patterns::*;
pub use recipes::*;
pub use resolver::*;

use crate::game::{Inventory, ItemId};
use crate::{RuneforgeError, RuneforgeResult};
use serde::{Deserialize, Serialize};

/// Number of cells in the crafting grid.
pub const GRID_SIZE: usize = 9;

/// The 3x3 crafting grid. Each cell is empty or holds one unit of an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingGrid {
    cells: [Option<ItemId>; GRID_SIZE],
}

impl CraftingGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a grid from explicit cell contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use runeforge::CraftingGrid;
    ///
    /// let grid = CraftingGrid::from_cells([
    ///     Some("iron"), Some("iron"), Some("wood"),
    ///     None, None, None,
    ///     None, None, None,
    /// ]);
    /// assert_eq!(grid.filled_count(), 3);
    /// ```
    pub fn from_cells(cells: [Option<&str>; GRID_SIZE]) -> Self {
        Self {
            cells: cells.map(|cell| cell.map(str::to_string)),
        }
    }

    /// Contents of one cell. Out-of-range indices read as empty.
    pub fn get(&self, index: usize) -> Option<&ItemId> {
        self.cells.get(index).and_then(|cell| cell.as_ref())
    }

    /// Whether a cell holds an item.
    pub fn is_filled(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    pub fn cells(&self) -> &[Option<ItemId>; GRID_SIZE] {
        &self.cells
    }

    /// Item ids of every filled cell, in cell order.
    pub fn items(&self) -> Vec<ItemId> {
        self.cells.iter().flatten().cloned().collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Empties every cell. Items on the grid are discarded.
    pub fn clear(&mut self) {
        self.cells = Default::default();
    }

    /// Moves one unit of `item_id` from the inventory onto a cell.
    ///
    /// An item already in the cell goes back to the inventory.
    pub fn place(
        &mut self,
        index: usize,
        item_id: &str,
        inventory: &mut Inventory,
    ) -> RuneforgeResult<()> {
        check_index(index)?;
        inventory.remove(item_id, 1)?;
        if let Some(previous) = self.cells[index].replace(item_id.to_string()) {
            inventory.add(&previous, 1);
        }
        Ok(())
    }

    /// Moves the item in a cell back to the inventory.
    pub fn take(&mut self, index: usize, inventory: &mut Inventory) -> RuneforgeResult<Option<ItemId>> {
        check_index(index)?;
        let taken = self.cells[index].take();
        if let Some(item_id) = &taken {
            inventory.add(item_id, 1);
        }
        Ok(taken)
    }

    /// Moves every item on the grid back to the inventory.
    pub fn return_all(&mut self, inventory: &mut Inventory) {
        for cell in self.cells.iter_mut() {
            if let Some(item_id) = cell.take() {
                inventory.add(&item_id, 1);
            }
        }
    }
}

fn check_index(index: usize) -> RuneforgeResult<()> {
    if index >= GRID_SIZE {
        return Err(RuneforgeError::InvalidAction(format!(
            "Grid cell {} is out of range",
            index
        )));
    }
    Ok(())
}

/// The three crafting sliders, each clamped to 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlValues {
    pub magic: u32,
    pub stability: u32,
    /// Only takes effect while a cursed ring is equipped
    pub curse: u32,
}

impl ControlValues {
    /// Creates control values, clamping each to 100.
    pub fn new(magic: u32, stability: u32, curse: u32) -> Self {
        Self {
            magic: magic.min(100),
            stability: stability.min(100),
            curse: curse.min(100),
        }
    }
}

impl Default for ControlValues {
    fn default() -> Self {
        Self::new(0, 50, 0)
    }
}
