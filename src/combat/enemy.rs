//! # Enemy Templates
//!
//! Static enemy definitions and the catalog combat sessions draw them from.

use super::{CombatEntity, CombatStats, SpecialSkill};
use crate::config::{BASE_CRIT_CHANCE, BASE_CRIT_DAMAGE};
use crate::game::Element;
use crate::{RuneforgeError, RuneforgeResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

fn default_crit_chance() -> i32 {
    BASE_CRIT_CHANCE
}

fn default_crit_damage() -> i32 {
    BASE_CRIT_DAMAGE
}

/// Fixed base stats of an enemy type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level: u32,
    pub health: u32,
    pub magic_points: u32,
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
    #[serde(default = "default_crit_chance")]
    pub crit_chance: i32,
    #[serde(default = "default_crit_damage")]
    pub crit_damage: i32,
    #[serde(default)]
    pub resistances: BTreeMap<Element, i32>,
    /// Skill ids; each becomes a placeholder special skill
    #[serde(default)]
    pub skills: Vec<String>,
}

impl EnemyTemplate {
    /// Builds a fresh combat entity at full health and mana.
    pub fn to_entity(&self) -> CombatEntity {
        let mut stats = CombatStats::new();
        stats.attack = self.attack;
        stats.defense = self.defense;
        stats.magic_attack = self.magic_attack;
        stats.magic_defense = self.magic_defense;
        stats.speed = self.speed;
        stats.crit_chance = self.crit_chance;
        stats.crit_damage = self.crit_damage;
        for (element, value) in &self.resistances {
            stats.elemental_resistances.insert(*element, *value);
        }
        stats.special_skills = self
            .skills
            .iter()
            .map(|id| SpecialSkill::enemy_placeholder(id))
            .collect();

        CombatEntity::new(
            &self.name,
            self.level,
            self.health,
            self.magic_points,
            stats,
        )
    }
}

/// Read-only lookup table of enemy templates by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyCatalog {
    enemies: HashMap<String, EnemyTemplate>,
}

impl EnemyCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from templates.
    pub fn from_templates(templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        Self {
            enemies: templates.into_iter().map(|t| (t.id.clone(), t)).collect(),
        }
    }

    /// Looks up a template. Unknown ids are an error.
    pub fn get(&self, id: &str) -> RuneforgeResult<&EnemyTemplate> {
        self.enemies
            .get(id)
            .ok_or_else(|| RuneforgeError::UnknownEnemy(id.to_string()))
    }

    /// Iterates over all templates in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.enemies.values()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> EnemyTemplate {
        serde_json::from_str(
            r#"{
                "id": "wolf", "name": "Wolf", "level": 2, "health": 40, "magic_points": 10,
                "attack": 9, "defense": 4, "magic_attack": 0, "magic_defense": 2, "speed": 18,
                "resistances": { "ice": 20 },
                "skills": ["howl"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_template_defaults() {
        let template = wolf();
        assert_eq!(template.crit_chance, 5);
        assert_eq!(template.crit_damage, 150);
    }

    #[test]
    fn test_to_entity() {
        let entity = wolf().to_entity();
        assert_eq!(entity.name, "Wolf");
        assert_eq!(entity.health, 40);
        assert_eq!(entity.magic_points, 10);
        assert_eq!(entity.stats.speed, 18);
        assert_eq!(entity.stats.resistance(Element::Ice), 20);
        assert_eq!(entity.stats.resistance(Element::Fire), 0);
        assert_eq!(entity.stats.special_skills.len(), 1);
        assert_eq!(entity.stats.special_skills[0].mana_cost, 10);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = EnemyCatalog::from_templates(vec![wolf()]);
        assert!(catalog.get("wolf").is_ok());
        assert!(matches!(
            catalog.get("dragon"),
            Err(RuneforgeError::UnknownEnemy(_))
        ));
    }
}
