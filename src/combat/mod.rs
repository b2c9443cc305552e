//! # Combat Module
//!
//! Turn-based combat between the player and a single enemy.
//!
//! - Stat aggregation from character attributes and equipment
//! - Damage, healing and status-effect resolution
//! - Per-turn status effect ticking
//! - Enemy templates
//! - The combat session state machine and its optional pacing

pub mod damage;
pub mod effects;
pub mod enemy;
pub mod pacing;
pub mod session;
pub mod skills;
pub mod stats;

pub use damage::*;
pub use effects::*;
pub use enemy::*;
pub use pacing::*;
pub use session::*;
pub use skills::*;
pub use stats::*;

use crate::config::{BASE_CRIT_CHANCE, BASE_CRIT_DAMAGE};
use crate::game::{Element, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat combat stat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStats {
    pub attack: i32,
    pub defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub speed: i32,
    /// Critical hit chance in percent
    pub crit_chance: i32,
    /// Critical hit damage in percent (150 = 1.5x)
    pub crit_damage: i32,
    /// Resistance percentage per element
    pub elemental_resistances: BTreeMap<Element, i32>,
    pub special_skills: Vec<SpecialSkill>,
}

impl CombatStats {
    /// Stat block with every value at zero except the crit defaults.
    pub fn new() -> Self {
        Self {
            attack: 0,
            defense: 0,
            magic_attack: 0,
            magic_defense: 0,
            speed: 0,
            crit_chance: BASE_CRIT_CHANCE,
            crit_damage: BASE_CRIT_DAMAGE,
            elemental_resistances: Element::all().into_iter().map(|e| (e, 0)).collect(),
            special_skills: Vec::new(),
        }
    }

    /// Resistance to an element in percent.
    pub fn resistance(&self, element: Element) -> i32 {
        self.elemental_resistances
            .get(&element)
            .copied()
            .unwrap_or(0)
    }

    /// Adds `amount` onto the field addressed by `kind`.
    pub fn apply_modifier(&mut self, kind: StatKind, amount: i32) {
        match kind {
            StatKind::Attack => self.attack += amount,
            StatKind::Defense => self.defense += amount,
            StatKind::MagicAttack => self.magic_attack += amount,
            StatKind::MagicDefense => self.magic_defense += amount,
            StatKind::Speed => self.speed += amount,
            StatKind::CritChance => self.crit_chance += amount,
            StatKind::CritDamage => self.crit_damage += amount,
            StatKind::Resistance(element) => {
                *self.elemental_resistances.entry(element).or_insert(0) += amount;
            }
        }
    }

    /// Applies every recognised entry of a named stat map. Unknown names contribute nothing.
    pub fn apply_named(&mut self, stats: &BTreeMap<String, i32>) {
        for (name, amount) in stats {
            if let Some(kind) = StatKind::parse(name) {
                self.apply_modifier(kind, *amount);
            }
        }
    }

    /// Looks up a special skill by id.
    pub fn skill(&self, skill_id: &str) -> Option<&SpecialSkill> {
        self.special_skills.iter().find(|s| s.id == skill_id)
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A transient, battle-ready projection of a character or enemy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEntity {
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub magic_points: u32,
    pub max_magic_points: u32,
    pub stats: CombatStats,
    pub status_effects: Vec<StatusEffect>,
}

impl CombatEntity {
    /// Creates an entity at full health and mana with no status effects.
    pub fn new(
        name: &str,
        level: u32,
        max_health: u32,
        max_magic_points: u32,
        stats: CombatStats,
    ) -> Self {
        Self {
            name: name.to_string(),
            level,
            health: max_health,
            max_health,
            magic_points: max_magic_points,
            max_magic_points,
            stats,
            status_effects: Vec::new(),
        }
    }

    /// Whether health has reached zero.
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Subtracts damage, flooring health at zero. Returns damage actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let taken = amount.min(self.health);
        self.health -= taken;
        taken
    }

    /// Restores health up to max. Returns health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health - self.health.min(self.max_health));
        self.health += restored;
        restored
    }

    /// Whether the entity can pay `cost` magic points.
    pub fn can_afford(&self, cost: u32) -> bool {
        self.magic_points >= cost
    }

    /// Spends magic points, flooring at zero.
    pub fn spend_magic(&mut self, cost: u32) {
        self.magic_points = self.magic_points.saturating_sub(cost);
    }

    /// Attaches a status effect.
    pub fn add_status_effect(&mut self, effect: StatusEffect) {
        self.status_effects.push(effect);
    }

    /// Base stats plus the stat modifiers of every active status effect.
    pub fn effective_stats(&self) -> CombatStats {
        let mut stats = self.stats.clone();
        for effect in &self.status_effects {
            stats.apply_named(&effect.stat_modifiers);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_defaults() {
        let stats = CombatStats::new();
        assert_eq!(stats.crit_chance, 5);
        assert_eq!(stats.crit_damage, 150);
        assert_eq!(stats.elemental_resistances.len(), 8);
        assert!(stats.elemental_resistances.values().all(|v| *v == 0));
    }

    #[test]
    fn test_apply_named_ignores_unknown() {
        let mut stats = CombatStats::new();
        let mut bonuses = BTreeMap::new();
        bonuses.insert("Attack".to_string(), 4);
        bonuses.insert("Fire Resistance".to_string(), 20);
        bonuses.insert("Durability".to_string(), 100);
        stats.apply_named(&bonuses);
        assert_eq!(stats.attack, 4);
        assert_eq!(stats.resistance(Element::Fire), 20);
    }

    #[test]
    fn test_entity_health_clamps() {
        let mut entity = CombatEntity::new("Dummy", 1, 30, 10, CombatStats::new());
        assert_eq!(entity.take_damage(50), 30);
        assert!(entity.is_defeated());
        assert_eq!(entity.heal(100), 30);
        assert_eq!(entity.health, 30);
    }

    #[test]
    fn test_effective_stats_include_effects() {
        let mut entity = CombatEntity::new("Dummy", 1, 30, 10, CombatStats::new());
        let mut modifiers = BTreeMap::new();
        modifiers.insert("Defense".to_string(), 10);
        entity.add_status_effect(StatusEffect::new(
            "Stone Skin",
            "Hardened skin",
            3,
            EffectType::Buff,
            modifiers,
            None,
        ));
        assert_eq!(entity.effective_stats().defense, 10);
        assert_eq!(entity.stats.defense, 0);
    }
}
