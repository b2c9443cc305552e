//! # Pattern Bonuses
//!
//! Stat and rarity bonuses granted per grid pattern and crafted item type.

use crate::crafting::{PatternBonus, PatternRegistry, PatternType};
use crate::game::ItemType;

pub(super) fn standard_pattern_bonuses() -> PatternRegistry {
    let mut registry = PatternRegistry::new();
    let table = [
        (
            PatternType::Linear,
            ItemType::Weapon,
            PatternBonus::new(0, "A straight, balanced edge").with_stat("Attack", 2),
        ),
        (
            PatternType::Diagonal,
            ItemType::Weapon,
            PatternBonus::new(1, "A slanted, piercing edge").with_stat("Crit Chance", 5),
        ),
        (
            PatternType::Cross,
            ItemType::Weapon,
            PatternBonus::new(1, "A hilt forged in the shape of a cross")
                .with_stat("Attack", 4)
                .with_stat("Holy Resistance", 10),
        ),
        (
            PatternType::Triangle,
            ItemType::Weapon,
            PatternBonus::new(1, "A sharp triangular point").with_stat("Crit Damage", 20),
        ),
        (
            PatternType::Square,
            ItemType::Armor,
            PatternBonus::new(1, "Sturdy, evenly layered plating").with_stat("Defense", 4),
        ),
        (
            PatternType::Circle,
            ItemType::Armor,
            PatternBonus::new(2, "A seamless enclosing weave")
                .with_stat("Defense", 6)
                .with_stat("Magic Defense", 6),
        ),
        (
            PatternType::LShape,
            ItemType::Armor,
            PatternBonus::new(0, "Reinforced joints").with_stat("Speed", 2),
        ),
        (
            PatternType::Circle,
            ItemType::Accessory,
            PatternBonus::new(2, "A perfect circle of power").with_stat("Magic Power", 5),
        ),
        (
            PatternType::Diagonal,
            ItemType::Accessory,
            PatternBonus::new(1, "Facets aligned to the light").with_stat("Arcane Resistance", 10),
        ),
        (
            PatternType::Linear,
            ItemType::Potion,
            PatternBonus::new(0, "A steady distillation"),
        ),
        (
            PatternType::Square,
            ItemType::Potion,
            PatternBonus::new(1, "A concentrated brew"),
        ),
    ];
    for (pattern, item_type, bonus) in table {
        registry.insert(pattern, item_type, bonus);
    }
    registry
}
