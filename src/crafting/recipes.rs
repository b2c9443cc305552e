//! # Recipes
//!
//! Static recipe definitions and order-independent matching of grid contents against them.

use super::{CraftingGrid, DiscoveryStore};
use crate::game::{CraftingSkill, ItemId};
use crate::{RuneforgeError, RuneforgeResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-control target values a recipe rewards getting close to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalControls {
    #[serde(default)]
    pub magic: Option<u32>,
    #[serde(default)]
    pub stability: Option<u32>,
    #[serde(default)]
    pub curse: Option<u32>,
}

/// A crafting recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// Input item ids as a multiset; order is irrelevant
    pub inputs: Vec<ItemId>,
    pub output: ItemId,
    #[serde(default)]
    pub required_skills: BTreeMap<CraftingSkill, u32>,
    /// Skill experience granted on success
    #[serde(default)]
    pub experience: BTreeMap<CraftingSkill, u32>,
    #[serde(default)]
    pub magic_cost: u32,
    /// Legacy forge temperature, informational only
    #[serde(default)]
    pub temperature: Option<u32>,
    #[serde(default)]
    pub optimal_controls: Option<OptimalControls>,
    /// Hidden until discovered
    #[serde(default)]
    pub is_secret: bool,
}

impl Recipe {
    /// Creates a recipe with no requirements, experience or magic cost.
    pub fn new(id: &str, name: &str, inputs: &[&str], output: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
            output: output.to_string(),
            required_skills: BTreeMap::new(),
            experience: BTreeMap::new(),
            magic_cost: 0,
            temperature: None,
            optimal_controls: None,
            is_secret: false,
        }
    }

    pub fn with_required_skill(mut self, skill: CraftingSkill, level: u32) -> Self {
        self.required_skills.insert(skill, level);
        self
    }

    pub fn with_experience(mut self, skill: CraftingSkill, amount: u32) -> Self {
        self.experience.insert(skill, amount);
        self
    }

    pub fn with_magic_cost(mut self, magic_cost: u32) -> Self {
        self.magic_cost = magic_cost;
        self
    }

    pub fn with_temperature(mut self, temperature: u32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_optimal_controls(mut self, optimal: OptimalControls) -> Self {
        self.optimal_controls = Some(optimal);
        self
    }

    pub fn secret(mut self) -> Self {
        self.is_secret = true;
        self
    }

    /// Required quantity of each input item.
    pub fn input_counts(&self) -> BTreeMap<&str, u32> {
        let mut counts = BTreeMap::new();
        for input in &self.inputs {
            *counts.entry(input.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether `items` equals the recipe's inputs as a multiset.
    ///
    /// # Examples
    ///
    /// ```
    /// use runeforge::Recipe;
    ///
    /// let sword = Recipe::new("sword", "Sword", &["wood", "iron", "iron"], "iron_sword");
    /// let grid = vec!["iron".to_string(), "iron".to_string(), "wood".to_string()];
    /// assert!(sword.matches_items(&grid));
    /// assert!(!sword.matches_items(&grid[..2]));
    /// ```
    pub fn matches_items(&self, items: &[ItemId]) -> bool {
        if items.len() != self.inputs.len() {
            return false;
        }
        let mut expected: Vec<&str> = self.inputs.iter().map(String::as_str).collect();
        let mut actual: Vec<&str> = items.iter().map(String::as_str).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        expected == actual
    }
}

/// Ordered collection of recipes. The first matching recipe wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeBook {
    recipes: Vec<Recipe>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_recipes(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: recipes.into_iter().collect(),
        }
    }

    /// Adds a recipe, replacing one with the same id.
    pub fn insert(&mut self, recipe: Recipe) {
        match self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe,
            None => self.recipes.push(recipe),
        }
    }

    /// Looks up a recipe. Unknown ids are an error.
    pub fn get(&self, id: &str) -> RuneforgeResult<&Recipe> {
        self.recipes
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| RuneforgeError::UnknownRecipe(id.to_string()))
    }

    /// First recipe whose inputs match the grid's items as a multiset.
    pub fn find_match(&self, grid: &CraftingGrid) -> Option<&Recipe> {
        let items = grid.items();
        if items.is_empty() {
            return None;
        }
        self.recipes.iter().find(|r| r.matches_items(&items))
    }

    /// Recipes the player may see: every non-secret recipe plus discovered secrets.
    pub fn visible_recipes(&self, discoveries: &dyn DiscoveryStore) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| !r.is_secret || discoveries.is_discovered(&r.id))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
