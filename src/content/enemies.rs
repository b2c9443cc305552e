//! # Standard Enemies
//!
//! Enemy templates from the forest goblin up to the ancient dragon. Skill ids become
//! placeholder skills when an encounter starts.

use crate::combat::EnemyTemplate;
use crate::config::{BASE_CRIT_CHANCE, BASE_CRIT_DAMAGE};
use crate::game::Element;
use std::collections::BTreeMap;

#[allow(clippy::too_many_arguments)]
fn enemy(
    id: &str,
    name: &str,
    description: &str,
    level: u32,
    health: u32,
    magic_points: u32,
    [attack, defense, magic_attack, magic_defense, speed]: [i32; 5],
    skills: &[&str],
) -> EnemyTemplate {
    EnemyTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        level,
        health,
        magic_points,
        attack,
        defense,
        magic_attack,
        magic_defense,
        speed,
        crit_chance: BASE_CRIT_CHANCE,
        crit_damage: BASE_CRIT_DAMAGE,
        resistances: BTreeMap::new(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
    }
}

fn with_resistance(mut template: EnemyTemplate, element: Element, value: i32) -> EnemyTemplate {
    template.resistances.insert(element, value);
    template
}

pub(super) fn standard_enemies() -> Vec<EnemyTemplate> {
    vec![
        enemy(
            "forest_goblin",
            "Forest Goblin",
            "A small, cunning creature that lurks in the woods",
            2,
            50,
            20,
            [10, 8, 5, 5, 15],
            &["sneak_attack"],
        ),
        with_resistance(
            enemy(
                "cave_troll",
                "Cave Troll",
                "A hulking brute that shrugs off blows",
                5,
                140,
                10,
                [18, 20, 0, 6, 6],
                &["crushing_blow"],
            ),
            Element::Physical,
            15,
        ),
        with_resistance(
            with_resistance(
                enemy(
                    "fire_elemental",
                    "Fire Elemental",
                    "Living flame bound to the volcanic depths",
                    7,
                    110,
                    60,
                    [12, 10, 24, 18, 14],
                    &["fireball", "flame_wave"],
                ),
                Element::Fire,
                80,
            ),
            Element::Ice,
            -30,
        ),
        with_resistance(
            enemy(
                "shadow_wraith",
                "Shadow Wraith",
                "A restless spirit that feeds on despair",
                9,
                120,
                80,
                [16, 12, 28, 22, 20],
                &["life_drain"],
            ),
            Element::Holy,
            -40,
        ),
        with_resistance(
            enemy(
                "ancient_dragon",
                "Ancient Dragon",
                "An old wyrm guarding a hoard of scales and gold",
                15,
                400,
                150,
                [40, 35, 38, 30, 18],
                &["dragon_breath", "tail_sweep"],
            ),
            Element::Fire,
            60,
        ),
    ]
}
