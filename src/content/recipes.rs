//! # Standard Recipes
//!
//! Smithing, alchemy and enchanting recipes, including the secret ones that stay hidden
//! until crafted once.

use crate::crafting::{OptimalControls, Recipe};
use crate::game::CraftingSkill::{Magicworking, Metalworking, Spellcraft};
use crate::{HEALTH_POTION_ID, MANA_POTION_ID};

pub(super) fn standard_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("sword", "Iron Sword", &["wood", "iron", "iron"], "iron_sword")
            .with_required_skill(Metalworking, 1)
            .with_experience(Metalworking, 25)
            .with_temperature(1200),
        Recipe::new("leather_cap", "Leather Cap", &["leather", "leather"], "leather_cap")
            .with_experience(Metalworking, 10),
        Recipe::new("leather_boots", "Leather Boots", &["leather", "leather", "leather"], "leather_boots")
            .with_experience(Metalworking, 15),
        Recipe::new(
            "iron_chestplate",
            "Iron Chestplate",
            &["iron", "iron", "iron", "iron", "leather"],
            "iron_chestplate",
        )
        .with_required_skill(Metalworking, 2)
        .with_experience(Metalworking, 40)
        .with_temperature(1400),
        Recipe::new("health_potion", "Health Potion", &["herb", "water"], HEALTH_POTION_ID)
            .with_experience(Spellcraft, 10)
            .with_optimal_controls(OptimalControls {
                magic: Some(20),
                stability: Some(70),
                curse: None,
            }),
        Recipe::new("mana_potion", "Mana Potion", &["mana_shard", "water"], MANA_POTION_ID)
            .with_magic_cost(5)
            .with_experience(Spellcraft, 15)
            .with_optimal_controls(OptimalControls {
                magic: Some(50),
                stability: Some(60),
                curse: None,
            }),
        Recipe::new(
            "crystal_amulet",
            "Crystal Amulet",
            &["crystal", "crystal", "leather"],
            "crystal_amulet",
        )
        .with_required_skill(Magicworking, 2)
        .with_magic_cost(10)
        .with_experience(Magicworking, 30),
        Recipe::new(
            "crystal_staff",
            "Crystal Staff",
            &["wood", "wood", "crystal", "mana_shard"],
            "crystal_staff",
        )
        .with_required_skill(Magicworking, 2)
        .with_required_skill(Spellcraft, 2)
        .with_magic_cost(15)
        .with_experience(Magicworking, 30)
        .with_experience(Spellcraft, 30)
        .with_optimal_controls(OptimalControls {
            magic: Some(60),
            stability: Some(50),
            curse: None,
        }),
        Recipe::new(
            "flame_blade",
            "Flame Blade",
            &["iron", "iron", "fire_essence", "wood"],
            "flame_blade",
        )
        .with_required_skill(Metalworking, 3)
        .with_required_skill(Magicworking, 2)
        .with_magic_cost(20)
        .with_experience(Metalworking, 50)
        .with_experience(Magicworking, 30)
        .with_temperature(1600),
        Recipe::new(
            "ring_of_power",
            "Ring of Power",
            &["iron", "crystal", "mana_shard"],
            "ring_of_power",
        )
        .with_required_skill(Magicworking, 3)
        .with_magic_cost(20)
        .with_experience(Magicworking, 50),
        Recipe::new(
            "shadow_blade",
            "Shadow Blade",
            &["iron", "iron", "shadow_essence", "crystal"],
            "shadow_blade",
        )
        .with_required_skill(Metalworking, 4)
        .with_required_skill(Spellcraft, 3)
        .with_magic_cost(30)
        .with_experience(Metalworking, 60)
        .with_experience(Spellcraft, 60)
        .with_optimal_controls(OptimalControls {
            magic: Some(80),
            stability: Some(30),
            curse: Some(50),
        })
        .secret(),
        Recipe::new(
            "dragon_shield",
            "Dragon Shield",
            &["dragon_scale", "dragon_scale", "iron", "iron", "leather"],
            "dragon_shield",
        )
        .with_required_skill(Metalworking, 5)
        .with_required_skill(Magicworking, 3)
        .with_magic_cost(40)
        .with_experience(Metalworking, 100)
        .with_experience(Magicworking, 50)
        .with_temperature(2000)
        .secret(),
    ]
}
