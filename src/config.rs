//! # Engine Configuration
//!
//! Fixed formula constants plus the serde-loadable tunables for combat and crafting.

use crate::RuneforgeResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Constant in the diminishing-returns defense curve `1 - d / (d + K)`.
pub const DEFENSE_CURVE_CONSTANT: f64 = 50.0;

/// Critical hit chance every combat stat block starts with, in percent.
pub const BASE_CRIT_CHANCE: i32 = 5;

/// Critical hit damage every combat stat block starts with, in percent.
pub const BASE_CRIT_DAMAGE: i32 = 150;

/// Experience per skill level needed for a crafting skill level-up.
pub const SKILL_EXPERIENCE_PER_LEVEL: u32 = 100;

/// Multiplier applied to the character experience threshold on level-up.
pub const LEVEL_THRESHOLD_MULTIPLIER: f64 = 1.5;

/// Max health gained per character level-up.
pub const LEVEL_UP_HEALTH: u32 = 10;

/// Max magic points gained per character level-up.
pub const LEVEL_UP_MAGIC: u32 = 5;

/// Fraction of max health/magic restored after a defeat.
pub const DEFEAT_RECOVERY_FRACTION: f64 = 0.1;

/// Default number of ring slots.
pub const DEFAULT_RING_SLOTS: usize = 2;

/// Tunables for the combat state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Probability that fleeing succeeds (0.0 to 1.0)
    pub flee_chance: f64,
    /// Probability that the enemy tries its first special skill
    pub enemy_special_chance: f64,
    /// Probability that an enemy basic attack also inflicts a status effect
    pub enemy_status_chance: f64,
    /// Duration in turns of enemy-inflicted status effects
    pub enemy_status_duration: u32,
    /// Duration used when a skill does not declare one
    pub default_effect_duration: u32,
    /// Probability of a health potion drop on victory
    pub health_potion_drop_chance: f64,
    /// Probability of a mana potion drop on victory
    pub mana_potion_drop_chance: f64,
    /// Pause before the enemy acts, in milliseconds
    pub enemy_turn_delay_ms: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            flee_chance: 0.5,
            enemy_special_chance: 0.3,
            enemy_status_chance: 0.1,
            enemy_status_duration: 2,
            default_effect_duration: 3,
            health_potion_drop_chance: 0.5,
            mana_potion_drop_chance: 0.3,
            enemy_turn_delay_ms: 1000,
        }
    }
}

/// Tunables for the crafting resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftingConfig {
    /// Base success chance for grid crafting, in percent
    pub base_success_chance: f64,
    /// Base success chance for quick crafting, in percent
    pub quick_craft_base_chance: f64,
    /// Lowest success chance after clamping
    pub min_success_chance: f64,
    /// Highest success chance after clamping
    pub max_success_chance: f64,
}

impl Default for CraftingConfig {
    fn default() -> Self {
        Self {
            base_success_chance: 90.0,
            quick_craft_base_chance: 80.0,
            min_success_chance: 5.0,
            max_success_chance: 95.0,
        }
    }
}

/// Top-level engine configuration.
///
/// # Examples
///
/// ```
/// use runeforge::EngineConfig;
///
/// let config = EngineConfig::from_json_str(r#"{ "ring_slots": 10 }"#).unwrap();
/// assert_eq!(config.ring_slots, 10);
/// assert_eq!(config.combat.flee_chance, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of ring slots on every character
    pub ring_slots: usize,
    /// Combat tunables
    pub combat: CombatConfig,
    /// Crafting tunables
    pub crafting: CraftingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ring_slots: DEFAULT_RING_SLOTS,
            combat: CombatConfig::default(),
            crafting: CraftingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Creates a configuration for tests: no enemy turn delay.
    pub fn for_testing() -> Self {
        Self {
            combat: CombatConfig {
                enemy_turn_delay_ms: 0,
                ..CombatConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> RuneforgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> RuneforgeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
