//! # Content Module
//!
//! The static catalogs the engine reads from: items, recipes, enemies, special skills and
//! pattern bonuses. [`Catalog::standard`] builds the built-in content set.

mod enemies;
mod items;
mod patterns;
mod recipes;
mod skills;

use crate::combat::{CombatEvent, CombatSession, EnemyCatalog, SkillRegistry};
use crate::config::CraftingConfig;
use crate::crafting::{CraftingResolver, PatternRegistry, RecipeBook};
use crate::game::{Character, ItemCatalog};
use crate::{RuneforgeError, RuneforgeResult};
use log::debug;

/// Every read-only lookup table the engine consults.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub items: ItemCatalog,
    pub recipes: RecipeBook,
    pub enemies: EnemyCatalog,
    pub skills: SkillRegistry,
    pub patterns: PatternRegistry,
}

impl Catalog {
    /// The built-in content set.
    ///
    /// # Examples
    ///
    /// ```
    /// use runeforge::Catalog;
    ///
    /// let catalog = Catalog::standard();
    /// assert!(catalog.validate().is_ok());
    /// assert_eq!(catalog.enemies.get("forest_goblin").unwrap().speed, 15);
    /// ```
    pub fn standard() -> Self {
        Self {
            items: ItemCatalog::from_items(items::standard_items()),
            recipes: RecipeBook::from_recipes(recipes::standard_recipes()),
            enemies: EnemyCatalog::from_templates(enemies::standard_enemies()),
            skills: skills::standard_skills(),
            patterns: patterns::standard_pattern_bonuses(),
        }
    }

    /// Checks that every id the catalogs reference exists.
    ///
    /// Recipe inputs and outputs must be catalog items and every item special ability must
    /// be a registered skill.
    pub fn validate(&self) -> RuneforgeResult<()> {
        for recipe in self.recipes.iter() {
            if recipe.inputs.is_empty() {
                return Err(RuneforgeError::InvalidCatalog(format!(
                    "Recipe {} has no inputs",
                    recipe.id
                )));
            }
            for item_id in recipe.inputs.iter().chain(std::iter::once(&recipe.output)) {
                if !self.items.contains(item_id) {
                    return Err(RuneforgeError::InvalidCatalog(format!(
                        "Recipe {} references unknown item {}",
                        recipe.id, item_id
                    )));
                }
            }
        }

        for item in self.items.iter() {
            if let Some(ability) = &item.special_ability {
                if !self.skills.contains(ability) {
                    return Err(RuneforgeError::InvalidCatalog(format!(
                        "Item {} grants unregistered skill {}",
                        item.id, ability
                    )));
                }
            }
        }

        debug!(
            "Catalog valid: {} items, {} recipes, {} enemies, {} skills",
            self.items.len(),
            self.recipes.len(),
            self.enemies.len(),
            self.skills.len()
        );
        Ok(())
    }

    /// A crafting resolver over this catalog.
    pub fn resolver<'a>(&'a self, config: &'a CraftingConfig) -> CraftingResolver<'a> {
        CraftingResolver::new(&self.items, &self.recipes, &self.patterns, config)
    }

    /// Starts combat against the enemy with the given id.
    pub fn start_combat(
        &self,
        session: &mut CombatSession,
        character: &Character,
        enemy_id: &str,
    ) -> RuneforgeResult<Vec<CombatEvent>> {
        let enemy = self.enemies.get(enemy_id)?;
        session.start(character, &self.items, &self.skills, enemy)
    }
}
