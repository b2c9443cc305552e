//! # Crafting Resolver
//!
//! Resolves a crafting attempt from the grid or directly from a recipe id (quick craft).
//!
//! Grid crafting consumes the ingredients on the grid whatever the outcome: the grid is
//! cleared and the magic cost is paid on both success and failure. Only a missing recipe
//! or a lack of magic points leaves everything untouched.

use super::{
    analyze_grid, ControlValues, CraftingGrid, DiscoveryStore, PatternAnalysis, PatternRegistry,
    Recipe, RecipeBook,
};
use crate::config::CraftingConfig;
use crate::game::{
    Character, CraftingSkill, CraftingSkills, Inventory, ItemCatalog, ItemId, ItemType, Rarity,
};
use crate::utils::{clamp_percent, RandomSource};
use crate::RuneforgeResult;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a crafting attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftStatus {
    Success,
    /// The roll failed; resources were consumed
    Failed,
    /// Nothing on the grid matches a recipe
    NoRecipe,
    InsufficientMagic,
    InsufficientIngredients,
}

/// The item a successful craft produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftedItem {
    pub item_id: ItemId,
    pub name: String,
    /// Catalog rarity raised by pattern boosts
    pub rarity: Rarity,
    /// Merged stat bonuses from applicable patterns
    pub stat_bonuses: BTreeMap<String, i32>,
    /// Comma-joined grid pattern names
    pub pattern: Option<String>,
}

/// Result descriptor of a crafting attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftOutcome {
    pub status: CraftStatus,
    pub recipe_id: Option<String>,
    /// Success chance in percent, 0 when no roll happened
    pub success_chance: f64,
    pub magic_spent: u32,
    pub crafted: Option<CraftedItem>,
    /// Crafting skills that levelled up
    pub skill_level_ups: Vec<CraftingSkill>,
    /// Whether this craft discovered a secret recipe
    pub discovered: bool,
    pub message: String,
}

impl CraftOutcome {
    fn rejected(status: CraftStatus, recipe_id: Option<&str>, message: String) -> Self {
        Self {
            status,
            recipe_id: recipe_id.map(str::to_string),
            success_chance: 0.0,
            magic_spent: 0,
            crafted: None,
            skill_level_ups: Vec::new(),
            discovered: false,
            message,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CraftStatus::Success
    }
}

/// The caller-owned state a craft reads and updates.
pub struct Workbench<'a> {
    pub character: &'a mut Character,
    pub inventory: &'a mut Inventory,
    pub discoveries: &'a mut dyn DiscoveryStore,
}

/// Curse control value that applies: the slider only counts while a cursed ring is worn.
pub fn effective_curse(character: &Character, controls: &ControlValues) -> u32 {
    if character.equipment.has_cursed_ring() {
        controls.curse
    } else {
        0
    }
}

/// Magic cost of a grid craft: `magic_cost + floor(magic / 20) * 5 + floor(curse / 10)`.
///
/// # Examples
///
/// ```
/// use runeforge::{grid_magic_cost, Recipe};
///
/// let recipe = Recipe::new("amulet", "Amulet", &["crystal"], "crystal_amulet").with_magic_cost(10);
/// assert_eq!(grid_magic_cost(&recipe, 45, 0), 20);
/// assert_eq!(grid_magic_cost(&recipe, 0, 35), 13);
/// ```
pub fn grid_magic_cost(recipe: &Recipe, magic: u32, curse: u32) -> u32 {
    recipe.magic_cost + (magic / 20) * 5 + curse / 10
}

/// Success chance of a grid craft in percent.
///
/// Each skill's contribution is capped at twice its requirement. Surplus skill adds 5 per
/// level up to 45, a shortfall costs 10 per level. Recipes with a magic cost are further
/// swayed by stability and curse.
pub fn grid_success_chance(
    recipe: &Recipe,
    skills: &CraftingSkills,
    controls: &ControlValues,
    curse: u32,
    config: &CraftingConfig,
) -> f64 {
    let mut chance = config.base_success_chance;

    let (total_required, total_character) = recipe
        .required_skills
        .iter()
        .filter(|(_, required)| **required > 0)
        .fold((0i64, 0i64), |(required, character), (skill, level)| {
            let capped = skills.level(*skill).min(level.saturating_mul(2));
            (required + *level as i64, character + capped as i64)
        });

    if total_required > 0 {
        let surplus = (total_character - total_required).max(0);
        let shortfall = (total_required - total_character).max(0);
        chance = config.base_success_chance + (surplus * 5).min(45) as f64 - (shortfall * 10) as f64;
    }

    if recipe.magic_cost > 0 {
        chance += (controls.stability as f64 - 50.0) / 2.0;
        if curse > 0 {
            chance -= curse as f64 / 10.0;
        }
    }

    clamp_percent(chance, config.min_success_chance, config.max_success_chance)
}

/// Success chance of a quick craft in percent.
///
/// Starts from the quick-craft base. Each declared optimal control within 10 of the
/// current value adds 5 and one further than 30 away costs 10. Each skill requirement
/// adds 5 when met and costs 5 when not.
pub fn quick_craft_chance(
    recipe: &Recipe,
    skills: &CraftingSkills,
    controls: &ControlValues,
    config: &CraftingConfig,
) -> f64 {
    let mut chance = config.quick_craft_base_chance;

    if let Some(optimal) = &recipe.optimal_controls {
        let pairs = [
            (optimal.magic, controls.magic),
            (optimal.stability, controls.stability),
            (optimal.curse, controls.curse),
        ];
        for (target, value) in pairs {
            let Some(target) = target else { continue };
            let distance = value.abs_diff(target);
            if distance <= 10 {
                chance += 5.0;
            } else if distance > 30 {
                chance -= 10.0;
            }
        }
    }

    for (skill, required) in &recipe.required_skills {
        if skills.level(*skill) >= *required {
            chance += 5.0;
        } else {
            chance -= 5.0;
        }
    }

    clamp_percent(chance, config.min_success_chance, config.max_success_chance)
}

/// Resolves crafting attempts against the static catalogs.
#[derive(Debug, Clone, Copy)]
pub struct CraftingResolver<'a> {
    items: &'a ItemCatalog,
    recipes: &'a RecipeBook,
    patterns: &'a PatternRegistry,
    config: &'a CraftingConfig,
}

impl<'a> CraftingResolver<'a> {
    pub fn new(
        items: &'a ItemCatalog,
        recipes: &'a RecipeBook,
        patterns: &'a PatternRegistry,
        config: &'a CraftingConfig,
    ) -> Self {
        Self {
            items,
            recipes,
            patterns,
            config,
        }
    }

    /// Crafts whatever is on the grid.
    ///
    /// With `selected_recipe` the grid must still match that recipe; otherwise the first
    /// recipe matching the grid's items is used. An unknown selected recipe or a recipe
    /// whose output is missing from the item catalog is an error.
    pub fn craft_from_grid(
        &self,
        bench: &mut Workbench<'_>,
        grid: &mut CraftingGrid,
        selected_recipe: Option<&str>,
        controls: ControlValues,
        rng: &mut impl RandomSource,
    ) -> RuneforgeResult<CraftOutcome> {
        let recipe = match selected_recipe {
            Some(id) => {
                let recipe = self.recipes.get(id)?;
                recipe.matches_items(&grid.items()).then_some(recipe)
            }
            None => self.recipes.find_match(grid),
        };
        let Some(recipe) = recipe else {
            debug!("No recipe matches grid {:?}", grid.items());
            return Ok(CraftOutcome::rejected(
                CraftStatus::NoRecipe,
                selected_recipe,
                "These ingredients don't form a known recipe".to_string(),
            ));
        };

        let output = self.items.get(&recipe.output)?;
        let curse = effective_curse(bench.character, &controls);
        let cost = grid_magic_cost(recipe, controls.magic, curse);
        if bench.character.magic_points < cost {
            return Ok(CraftOutcome::rejected(
                CraftStatus::InsufficientMagic,
                Some(&recipe.id),
                format!(
                    "Not enough magic to craft {}: need {}, have {}",
                    recipe.name, cost, bench.character.magic_points
                ),
            ));
        }

        let analysis = analyze_grid(grid);
        let chance = grid_success_chance(
            recipe,
            &bench.character.skills,
            &controls,
            curse,
            self.config,
        );
        let roll = rng.percent();
        debug!(
            "Crafting {}: chance {:.1}, roll {:.1}, cost {}",
            recipe.id, chance, roll, cost
        );

        bench.character.spend_magic(cost);
        grid.clear();

        if roll > chance {
            info!("Crafting {} failed", recipe.name);
            return Ok(self.failed(recipe, chance, cost));
        }

        let rarity_boost: u32 = self
            .patterns
            .bonuses_for(&analysis, output.item_type)
            .iter()
            .map(|bonus| bonus.rarity_boost)
            .sum();
        let crafted = CraftedItem {
            item_id: output.id.clone(),
            name: output.name.clone(),
            rarity: output.rarity.boosted(rarity_boost),
            stat_bonuses: self.pattern_stats(&analysis, output.item_type),
            pattern: analysis.pattern_tag(),
        };
        Ok(self.succeeded(bench, recipe, crafted, chance, cost))
    }

    /// Crafts a recipe straight from the inventory, bypassing the grid.
    ///
    /// Ingredients and the recipe's magic cost are consumed on both success and failure.
    pub fn quick_craft(
        &self,
        bench: &mut Workbench<'_>,
        recipe_id: &str,
        controls: ControlValues,
        rng: &mut impl RandomSource,
    ) -> RuneforgeResult<CraftOutcome> {
        let recipe = self.recipes.get(recipe_id)?;
        let output = self.items.get(&recipe.output)?;
        let counts = recipe.input_counts();

        if let Some((item_id, required)) = counts
            .iter()
            .find(|(item_id, required)| !bench.inventory.has(item_id, **required))
        {
            return Ok(CraftOutcome::rejected(
                CraftStatus::InsufficientIngredients,
                Some(recipe_id),
                format!(
                    "Missing ingredients for {}: need {} {}, have {}",
                    recipe.name,
                    required,
                    item_id,
                    bench.inventory.quantity_of(item_id)
                ),
            ));
        }
        if bench.character.magic_points < recipe.magic_cost {
            return Ok(CraftOutcome::rejected(
                CraftStatus::InsufficientMagic,
                Some(recipe_id),
                format!(
                    "Not enough magic to craft {}: need {}, have {}",
                    recipe.name, recipe.magic_cost, bench.character.magic_points
                ),
            ));
        }

        for (item_id, required) in &counts {
            bench.inventory.remove(item_id, *required)?;
        }
        bench.character.spend_magic(recipe.magic_cost);

        let chance = quick_craft_chance(recipe, &bench.character.skills, &controls, self.config);
        let roll = rng.percent();
        debug!(
            "Quick crafting {}: chance {:.1}, roll {:.1}",
            recipe.id, chance, roll
        );
        if roll > chance {
            info!("Quick crafting {} failed", recipe.name);
            return Ok(self.failed(recipe, chance, recipe.magic_cost));
        }

        let crafted = CraftedItem {
            item_id: output.id.clone(),
            name: output.name.clone(),
            rarity: output.rarity,
            stat_bonuses: BTreeMap::new(),
            pattern: None,
        };
        Ok(self.succeeded(bench, recipe, crafted, chance, recipe.magic_cost))
    }

    fn pattern_stats(
        &self,
        analysis: &PatternAnalysis,
        item_type: ItemType,
    ) -> BTreeMap<String, i32> {
        let mut merged = BTreeMap::new();
        for bonus in self.patterns.bonuses_for(analysis, item_type) {
            for (stat, amount) in &bonus.stat_bonus {
                *merged.entry(stat.clone()).or_insert(0) += amount;
            }
        }
        merged
    }

    fn failed(&self, recipe: &Recipe, chance: f64, cost: u32) -> CraftOutcome {
        CraftOutcome {
            status: CraftStatus::Failed,
            recipe_id: Some(recipe.id.clone()),
            success_chance: chance,
            magic_spent: cost,
            crafted: None,
            skill_level_ups: Vec::new(),
            discovered: false,
            message: format!("Crafting {} failed. The materials were lost.", recipe.name),
        }
    }

    fn succeeded(
        &self,
        bench: &mut Workbench<'_>,
        recipe: &Recipe,
        crafted: CraftedItem,
        chance: f64,
        cost: u32,
    ) -> CraftOutcome {
        bench
            .inventory
            .add_with_pattern(&crafted.item_id, 1, crafted.pattern.clone());

        let mut skill_level_ups = Vec::new();
        for (skill, amount) in &recipe.experience {
            if bench.character.skills.get_mut(*skill).add_experience(*amount) {
                skill_level_ups.push(*skill);
            }
        }

        let discovered = recipe.is_secret && bench.discoveries.record(&recipe.id);
        if discovered {
            info!("Discovered secret recipe {}", recipe.id);
        }
        info!("Crafted {} ({:?})", crafted.name, crafted.rarity);

        CraftOutcome {
            status: CraftStatus::Success,
            recipe_id: Some(recipe.id.clone()),
            success_chance: chance,
            magic_spent: cost,
            message: format!("Successfully crafted {}!", crafted.name),
            crafted: Some(crafted),
            skill_level_ups,
            discovered,
        }
    }
}
