//! # Damage Resolution
//!
//! Computes the outcome of a basic attack or special skill between two combat entities.
//!
//! Mitigation order for damage is: critical roll, defense curve `1 - d / (d + 50)`,
//! elemental resistance `1 - r / 100`, then floor with a minimum of one. Both entities'
//! effective stats (base stats plus status-effect modifiers) are used.

use super::{CombatEntity, CombatStats, SkillType, SpecialSkill, StatusEffect, TickEffect};
use crate::game::Element;
use crate::utils::{defense_factor, finalize_damage, resistance_factor, scaled, RandomSource};
use log::debug;
use serde::{Deserialize, Serialize};

/// Who a produced status effect lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectTarget {
    /// The entity that acted
    User,
    /// The entity that was acted upon
    Opponent,
}

/// Everything an attack or skill produced. Nothing has been applied yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    /// Damage to the opponent
    pub damage: u32,
    /// Healing to the user
    pub healing: u32,
    pub is_critical: bool,
    pub status_effect: Option<(EffectTarget, StatusEffect)>,
    pub message: String,
}

impl DamageOutcome {
    fn new(message: String) -> Self {
        Self {
            damage: 0,
            healing: 0,
            is_critical: false,
            status_effect: None,
            message,
        }
    }
}

/// Applies an outcome: damage to `opponent`, healing to `user`, and the status effect to
/// whichever side it targets.
pub fn apply_outcome(outcome: &DamageOutcome, user: &mut CombatEntity, opponent: &mut CombatEntity) {
    opponent.take_damage(outcome.damage);
    user.heal(outcome.healing);
    if let Some((target, effect)) = &outcome.status_effect {
        match target {
            EffectTarget::User => user.add_status_effect(effect.clone()),
            EffectTarget::Opponent => opponent.add_status_effect(effect.clone()),
        }
    }
}

/// Rolls a critical hit with probability `crit_chance / 100`. Always consumes one draw.
pub fn roll_critical(crit_chance: i32, rng: &mut impl RandomSource) -> bool {
    rng.chance(crit_chance as f64 / 100.0)
}

/// Crit, defense and resistance applied to a raw damage value.
fn mitigate(
    raw: f64,
    attacker: &CombatStats,
    defender: &CombatStats,
    element: Element,
    rng: &mut impl RandomSource,
) -> (u32, bool) {
    let mut damage = raw;
    let is_critical = roll_critical(attacker.crit_chance, rng);
    if is_critical {
        damage *= attacker.crit_damage.max(0) as f64 / 100.0;
    }
    let defense = if element.is_magical() {
        defender.magic_defense
    } else {
        defender.defense
    };
    damage *= defense_factor(defense);
    damage *= resistance_factor(defender.resistance(element));
    (finalize_damage(damage), is_critical)
}

fn critical_suffix(is_critical: bool) -> &'static str {
    if is_critical {
        " (Critical Hit!)"
    } else {
        ""
    }
}

/// Resolves a basic attack.
///
/// Damage starts at the attacker's attack stat and always ends at least 1.
///
/// # Examples
///
/// ```
/// use runeforge::{basic_attack, CombatEntity, CombatStats, Element, ScriptedRandom};
///
/// let mut hero_stats = CombatStats::new();
/// hero_stats.attack = 20;
/// let mut goblin_stats = CombatStats::new();
/// goblin_stats.defense = 8;
/// let hero = CombatEntity::new("Hero", 5, 100, 0, hero_stats);
/// let goblin = CombatEntity::new("Forest Goblin", 2, 50, 20, goblin_stats);
///
/// let mut rng = ScriptedRandom::new(vec![0.99]);
/// let outcome = basic_attack(&hero, &goblin, Element::Physical, &mut rng);
/// assert_eq!(outcome.damage, 17);
/// assert!(!outcome.is_critical);
/// ```
pub fn basic_attack(
    attacker: &CombatEntity,
    defender: &CombatEntity,
    element: Element,
    rng: &mut impl RandomSource,
) -> DamageOutcome {
    let attacker_stats = attacker.effective_stats();
    let defender_stats = defender.effective_stats();

    let (damage, is_critical) = mitigate(
        attacker_stats.attack.max(0) as f64,
        &attacker_stats,
        &defender_stats,
        element,
        rng,
    );
    debug!(
        "{} basic attack on {}: {} damage (crit: {})",
        attacker.name, defender.name, damage, is_critical
    );

    let mut outcome = DamageOutcome::new(format!(
        "{} attacks {} for {} damage{}",
        attacker.name,
        defender.name,
        damage,
        critical_suffix(is_critical)
    ));
    outcome.damage = damage;
    outcome.is_critical = is_critical;
    outcome
}

/// Resolves a special skill. Mana is not checked or spent here.
///
/// `default_duration` is used for buff, debuff, dot and shield effects when the skill does
/// not declare a duration.
pub fn use_special_skill(
    attacker: &CombatEntity,
    defender: &CombatEntity,
    skill: &SpecialSkill,
    default_duration: u32,
    rng: &mut impl RandomSource,
) -> DamageOutcome {
    let attacker_stats = attacker.effective_stats();
    let defender_stats = defender.effective_stats();
    let duration = skill.effects.duration.unwrap_or(default_duration);

    let outcome = match skill.skill_type {
        SkillType::Damage => {
            let stat = if skill.element.is_magical() {
                attacker_stats.magic_attack
            } else {
                attacker_stats.attack
            };
            let (damage, is_critical) = mitigate(
                scaled(stat, skill.base_power),
                &attacker_stats,
                &defender_stats,
                skill.element,
                rng,
            );
            let mut outcome = DamageOutcome::new(format!(
                "{} uses {} on {} for {} damage{}",
                attacker.name,
                skill.name,
                defender.name,
                damage,
                critical_suffix(is_critical)
            ));
            outcome.damage = damage;
            outcome.is_critical = is_critical;
            outcome
        }
        SkillType::Heal => {
            let healing = scaled(attacker_stats.magic_attack, skill.base_power).floor() as u32;
            let mut outcome = DamageOutcome::new(format!(
                "{} uses {} and heals for {} health",
                attacker.name, skill.name, healing
            ));
            outcome.healing = healing;
            outcome
        }
        SkillType::Buff | SkillType::Shield => {
            let effect = StatusEffect::new(
                &skill.name,
                &skill.description,
                duration,
                super::EffectType::Buff,
                skill.effects.stat_modifiers.clone(),
                None,
            );
            let mut outcome = DamageOutcome::new(format!(
                "{} uses {} and gains {} for {} turns",
                attacker.name, skill.name, skill.name, duration
            ));
            outcome.status_effect = Some((EffectTarget::User, effect));
            outcome
        }
        SkillType::Debuff => {
            let effect = StatusEffect::new(
                &skill.name,
                &skill.description,
                duration,
                super::EffectType::Debuff,
                skill.effects.stat_modifiers.clone(),
                None,
            );
            let mut outcome = DamageOutcome::new(format!(
                "{} uses {} on {} for {} turns",
                attacker.name, skill.name, defender.name, duration
            ));
            outcome.status_effect = Some((EffectTarget::Opponent, effect));
            outcome
        }
        SkillType::Dot => {
            let per_turn = (scaled(attacker_stats.magic_attack, skill.base_power) / 3.0).floor() as u32;
            let effect = StatusEffect::new(
                &skill.name,
                &skill.description,
                duration,
                super::EffectType::Debuff,
                skill.effects.stat_modifiers.clone(),
                Some(TickEffect::Damage(per_turn)),
            );
            let mut outcome = DamageOutcome::new(format!(
                "{} uses {} on {} for {} damage, plus {} per turn for {} turns",
                attacker.name, skill.name, defender.name, per_turn, per_turn, duration
            ));
            outcome.damage = per_turn;
            outcome.status_effect = Some((EffectTarget::Opponent, effect));
            outcome
        }
        SkillType::Lifesteal => {
            let raw = scaled(attacker_stats.attack, skill.base_power)
                * defense_factor(defender_stats.defense);
            let damage = finalize_damage(raw);
            let healing = (damage as f64 * 0.5).floor() as u32;
            let mut outcome = DamageOutcome::new(format!(
                "{} uses {} on {} for {} damage and heals for {} health",
                attacker.name, skill.name, defender.name, damage, healing
            ));
            outcome.damage = damage;
            outcome.healing = healing;
            outcome
        }
    };

    debug!("{}", outcome.message);
    outcome
}
