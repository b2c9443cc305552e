//! # Special Skills
//!
//! Equipment- and enemy-derived active abilities, and the registry that maps item special
//! ability tags to them.

use crate::game::Element;
use crate::{RuneforgeError, RuneforgeResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// What a special skill does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    Damage,
    Heal,
    Buff,
    Debuff,
    Dot,
    Shield,
    Lifesteal,
}

/// Status-effect payload of a skill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEffects {
    #[serde(default)]
    pub stat_modifiers: BTreeMap<String, i32>,
    /// Effect duration in turns; the combat default applies when absent
    #[serde(default)]
    pub duration: Option<u32>,
}

/// An active ability usable in combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub skill_type: SkillType,
    pub element: Element,
    /// Percentage of the scaling stat used as base power
    pub base_power: u32,
    pub mana_cost: u32,
    pub cooldown: u32,
    #[serde(default)]
    pub effects: SkillEffects,
}

impl SpecialSkill {
    /// Creates a skill with no status-effect payload.
    pub fn new(
        id: &str,
        name: &str,
        skill_type: SkillType,
        element: Element,
        base_power: u32,
        mana_cost: u32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            skill_type,
            element,
            base_power,
            mana_cost,
            cooldown: 0,
            effects: SkillEffects::default(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Sets the cooldown.
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Adds a stat modifier to the skill's status effect.
    pub fn with_modifier(mut self, stat: &str, amount: i32) -> Self {
        self.effects.stat_modifiers.insert(stat.to_string(), amount);
        self
    }

    /// Sets the status effect duration.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.effects.duration = Some(duration);
        self
    }

    /// Placeholder skill given to enemies for each id in their skill list.
    ///
    /// Physical damage, base power 100, mana cost 10, cooldown 3.
    pub fn enemy_placeholder(skill_id: &str) -> Self {
        SpecialSkill::new(
            skill_id,
            &display_name(skill_id),
            SkillType::Damage,
            Element::Physical,
            100,
            10,
        )
        .with_cooldown(3)
    }
}

/// Turns `shadow_bolt` into `Shadow Bolt`.
fn display_name(skill_id: &str) -> String {
    skill_id
        .split(|c: char| c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps item special-ability tags to the skills they grant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillRegistry {
    skills: HashMap<String, SpecialSkill>,
}

impl SkillRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a skill under an ability tag.
    pub fn register(&mut self, tag: &str, skill: SpecialSkill) {
        self.skills.insert(tag.to_string(), skill);
    }

    /// Skill for an ability tag, if one is registered.
    pub fn lookup(&self, tag: &str) -> Option<&SpecialSkill> {
        self.skills.get(tag)
    }

    /// Skill for an ability tag, erroring when absent.
    pub fn get(&self, tag: &str) -> RuneforgeResult<&SpecialSkill> {
        self.lookup(tag)
            .ok_or_else(|| RuneforgeError::UnknownSkill(tag.to_string()))
    }

    /// Whether a tag is registered.
    pub fn contains(&self, tag: &str) -> bool {
        self.skills.contains_key(tag)
    }

    /// Number of registered skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_placeholder() {
        let skill = SpecialSkill::enemy_placeholder("rusty_stab");
        assert_eq!(skill.name, "Rusty Stab");
        assert_eq!(skill.base_power, 100);
        assert_eq!(skill.mana_cost, 10);
        assert_eq!(skill.cooldown, 3);
        assert_eq!(skill.skill_type, SkillType::Damage);
    }

    #[test]
    fn test_registry_lookup() {
        let mut registry = SkillRegistry::new();
        registry.register(
            "flame",
            SpecialSkill::new("flame_strike", "Flame Strike", SkillType::Damage, Element::Fire, 150, 15),
        );
        assert!(registry.contains("flame"));
        assert_eq!(registry.get("flame").unwrap().id, "flame_strike");
        assert!(registry.lookup("frost").is_none());
        assert!(matches!(
            registry.get("frost"),
            Err(RuneforgeError::UnknownSkill(_))
        ));
    }
}
