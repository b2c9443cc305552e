//! # Status Effects
//!
//! Timed buffs and debuffs attached to combat entities, and the per-turn tick that
//! applies periodic damage and expires them.

use super::CombatEntity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whether an effect helps or hinders its holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectType {
    Buff,
    Debuff,
}

/// Periodic effect evaluated on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickEffect {
    /// Deals a fixed amount of damage each turn
    Damage(u32),
}

impl TickEffect {
    /// Damage dealt by one tick.
    pub fn damage(&self) -> u32 {
        match self {
            TickEffect::Damage(amount) => *amount,
        }
    }
}

/// A timed modifier attached to a combat entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    pub description: String,
    /// Turns remaining
    pub duration: u32,
    pub effect_type: EffectType,
    #[serde(default)]
    pub stat_modifiers: BTreeMap<String, i32>,
    #[serde(default)]
    pub tick: Option<TickEffect>,
}

impl StatusEffect {
    /// Creates a status effect.
    pub fn new(
        name: &str,
        description: &str,
        duration: u32,
        effect_type: EffectType,
        stat_modifiers: BTreeMap<String, i32>,
        tick: Option<TickEffect>,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            duration,
            effect_type,
            stat_modifiers,
            tick,
        }
    }

    /// A debuff with no stat modifiers that deals `damage` each turn.
    pub fn damage_over_time(name: &str, description: &str, duration: u32, damage: u32) -> Self {
        Self::new(
            name,
            description,
            duration,
            EffectType::Debuff,
            BTreeMap::new(),
            Some(TickEffect::Damage(damage)),
        )
    }
}

/// Result of ticking an entity's status effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// The entity with updated health and remaining effects
    pub entity: CombatEntity,
    /// Total damage dealt by ticks
    pub damage_taken: u32,
    /// One message per tick damage and per expired effect
    pub messages: Vec<String>,
}

/// Ticks every status effect on `entity` once.
///
/// Tick damage is subtracted from health (floored at zero), then every duration drops by one
/// and effects reaching zero are removed. The input is left untouched.
///
/// # Examples
///
/// ```
/// use runeforge::{tick_status_effects, CombatEntity, CombatStats, StatusEffect};
///
/// let mut goblin = CombatEntity::new("Goblin", 2, 50, 20, CombatStats::new());
/// goblin.add_status_effect(StatusEffect::damage_over_time("Poison", "Venom", 2, 3));
///
/// let outcome = tick_status_effects(&goblin);
/// assert_eq!(outcome.entity.health, 47);
/// assert_eq!(outcome.entity.status_effects[0].duration, 1);
/// ```
pub fn tick_status_effects(entity: &CombatEntity) -> TickOutcome {
    let mut updated = entity.clone();
    let mut messages = Vec::new();
    let mut damage_taken = 0;
    let mut remaining = Vec::with_capacity(entity.status_effects.len());

    for effect in &entity.status_effects {
        if let Some(tick) = effect.tick {
            let taken = updated.take_damage(tick.damage());
            damage_taken += taken;
            messages.push(format!(
                "{} takes {} damage from {}",
                updated.name, taken, effect.name
            ));
        }

        let duration = effect.duration.saturating_sub(1);
        if duration == 0 {
            messages.push(format!("{} wore off {}", effect.name, updated.name));
        } else {
            let mut kept = effect.clone();
            kept.duration = duration;
            remaining.push(kept);
        }
    }

    updated.status_effects = remaining;
    TickOutcome {
        entity: updated,
        damage_taken,
        messages,
    }
}
