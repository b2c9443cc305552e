//! # Characters
//!
//! The persistent character record the caller owns, plus the level-up rules that apply to it.

use super::Equipment;
use crate::config::{
    DEFAULT_RING_SLOTS, DEFEAT_RECOVERY_FRACTION, LEVEL_THRESHOLD_MULTIPLIER, LEVEL_UP_HEALTH,
    LEVEL_UP_MAGIC, SKILL_EXPERIENCE_PER_LEVEL,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three crafting disciplines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraftingSkill {
    Metalworking,
    Magicworking,
    Spellcraft,
}

impl CraftingSkill {
    /// Returns all crafting skills.
    pub fn all() -> [CraftingSkill; 3] {
        [
            CraftingSkill::Metalworking,
            CraftingSkill::Magicworking,
            CraftingSkill::Spellcraft,
        ]
    }
}

impl fmt::Display for CraftingSkill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CraftingSkill::Metalworking => "Metalworking",
            CraftingSkill::Magicworking => "Magicworking",
            CraftingSkill::Spellcraft => "Spellcraft",
        };
        f.write_str(name)
    }
}

/// Level and experience of one crafting skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillProgress {
    pub level: u32,
    pub experience: u32,
}

impl SkillProgress {
    /// Creates progress at `level` with no experience.
    pub fn new(level: u32) -> Self {
        Self {
            level,
            experience: 0,
        }
    }

    /// Experience needed for the next level.
    pub fn threshold(&self) -> u32 {
        self.level.saturating_mul(SKILL_EXPERIENCE_PER_LEVEL)
    }

    /// Adds experience, levelling up at most once. Returns true on level-up.
    ///
    /// Excess experience carries over into the new level.
    ///
    /// # Examples
    ///
    /// ```
    /// use runeforge::SkillProgress;
    ///
    /// let mut skill = SkillProgress { level: 2, experience: 200 };
    /// assert!(skill.add_experience(50));
    /// assert_eq!(skill, SkillProgress { level: 3, experience: 50 });
    /// ```
    pub fn add_experience(&mut self, amount: u32) -> bool {
        self.experience = self.experience.saturating_add(amount);
        let threshold = self.threshold();
        if self.experience >= threshold {
            self.experience -= threshold;
            self.level += 1;
            true
        } else {
            false
        }
    }
}

impl Default for SkillProgress {
    fn default() -> Self {
        Self::new(1)
    }
}

/// The character's three crafting skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingSkills {
    pub metalworking: SkillProgress,
    pub magicworking: SkillProgress,
    pub spellcraft: SkillProgress,
}

impl CraftingSkills {
    /// Progress for one skill.
    pub fn get(&self, skill: CraftingSkill) -> &SkillProgress {
        match skill {
            CraftingSkill::Metalworking => &self.metalworking,
            CraftingSkill::Magicworking => &self.magicworking,
            CraftingSkill::Spellcraft => &self.spellcraft,
        }
    }

    /// Mutable progress for one skill.
    pub fn get_mut(&mut self, skill: CraftingSkill) -> &mut SkillProgress {
        match skill {
            CraftingSkill::Metalworking => &mut self.metalworking,
            CraftingSkill::Magicworking => &mut self.magicworking,
            CraftingSkill::Spellcraft => &mut self.spellcraft,
        }
    }

    /// Current level of one skill.
    pub fn level(&self, skill: CraftingSkill) -> u32 {
        self.get(skill).level
    }
}

/// The persistent character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub strength: u32,
    pub speed: u32,
    pub health: u32,
    pub max_health: u32,
    pub magic_points: u32,
    pub max_magic_points: u32,
    pub gold: u32,
    pub gems: u32,
    pub skills: CraftingSkills,
    pub equipment: Equipment,
}

/// What changed when a character levelled up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUp {
    pub new_level: u32,
    pub new_max_health: u32,
    pub new_max_magic_points: u32,
}

impl Character {
    /// Creates a level 1 character with starting attributes and the default ring slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use runeforge::Character;
    ///
    /// let hero = Character::new("Hero");
    /// assert_eq!(hero.level, 1);
    /// assert_eq!(hero.health, hero.max_health);
    /// ```
    pub fn new(name: &str) -> Self {
        Self::with_ring_slots(name, DEFAULT_RING_SLOTS)
    }

    /// Creates a level 1 character with an explicit ring-slot capacity.
    pub fn with_ring_slots(name: &str, ring_slots: usize) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            experience: 0,
            experience_to_next_level: 100,
            strength: 5,
            speed: 5,
            health: 100,
            max_health: 100,
            magic_points: 50,
            max_magic_points: 50,
            gold: 100,
            gems: 0,
            skills: CraftingSkills::default(),
            equipment: Equipment::new(ring_slots),
        }
    }

    /// Whether the character's health is above zero.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Sets health, clamped to `[0, max_health]`.
    pub fn set_health(&mut self, health: u32) {
        self.health = health.min(self.max_health);
    }

    /// Sets magic points, clamped to `[0, max_magic_points]`.
    pub fn set_magic_points(&mut self, magic_points: u32) {
        self.magic_points = magic_points.min(self.max_magic_points);
    }

    /// Spends magic points, flooring at zero.
    pub fn spend_magic(&mut self, amount: u32) {
        self.magic_points = self.magic_points.saturating_sub(amount);
    }

    /// Adds experience and applies at most one character level-up.
    ///
    /// On level-up the threshold grows by 1.5x, max health and max magic grow and are fully
    /// restored, and strength and speed each rise by one. Excess experience carries over.
    pub fn gain_experience(&mut self, amount: u32) -> Option<LevelUp> {
        self.experience = self.experience.saturating_add(amount);
        if self.experience < self.experience_to_next_level {
            return None;
        }

        self.experience -= self.experience_to_next_level;
        self.level += 1;
        self.experience_to_next_level =
            (self.experience_to_next_level as f64 * LEVEL_THRESHOLD_MULTIPLIER).floor() as u32;
        self.max_health += LEVEL_UP_HEALTH;
        self.health = self.max_health;
        self.max_magic_points += LEVEL_UP_MAGIC;
        self.magic_points = self.max_magic_points;
        self.strength += 1;
        self.speed += 1;

        Some(LevelUp {
            new_level: self.level,
            new_max_health: self.max_health,
            new_max_magic_points: self.max_magic_points,
        })
    }

    /// Applies the post-defeat recovery floor to health and magic points.
    pub fn recover_from_defeat(&mut self) {
        self.health = defeat_recovery(self.max_health);
        self.magic_points = defeat_recovery(self.max_magic_points);
    }
}

/// Value restored after a defeat: `max(1, floor(max * 0.1))`.
///
/// # Examples
///
/// ```
/// use runeforge::defeat_recovery;
///
/// assert_eq!(defeat_recovery(100), 10);
/// assert_eq!(defeat_recovery(5), 1);
/// ```
pub fn defeat_recovery(max: u32) -> u32 {
    ((max as f64 * DEFEAT_RECOVERY_FRACTION).floor() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_up_exact_threshold() {
        let mut skill = SkillProgress {
            level: 1,
            experience: 0,
        };
        assert!(skill.add_experience(100));
        assert_eq!(skill.level, 2);
        assert_eq!(skill.experience, 0);
    }

    #[test]
    fn test_skill_level_up_carries_over() {
        let mut skill = SkillProgress {
            level: 2,
            experience: 200,
        };
        assert!(skill.add_experience(50));
        assert_eq!(skill.level, 3);
        assert_eq!(skill.experience, 50);
    }

    #[test]
    fn test_skill_levels_at_most_once() {
        let mut skill = SkillProgress::new(1);
        assert!(skill.add_experience(1000));
        assert_eq!(skill.level, 2);
        assert_eq!(skill.experience, 900);
    }

    #[test]
    fn test_skill_below_threshold() {
        let mut skill = SkillProgress::new(3);
        assert!(!skill.add_experience(299));
        assert_eq!(skill.level, 3);
    }

    #[test]
    fn test_character_level_up() {
        let mut hero = Character::new("Hero");
        hero.health = 40;
        hero.magic_points = 3;
        let level_up = hero.gain_experience(130).unwrap();
        assert_eq!(level_up.new_level, 2);
        assert_eq!(hero.experience, 30);
        assert_eq!(hero.experience_to_next_level, 150);
        assert_eq!(hero.max_health, 110);
        assert_eq!(hero.health, 110);
        assert_eq!(hero.max_magic_points, 55);
        assert_eq!(hero.magic_points, 55);
        assert_eq!(hero.strength, 6);
        assert_eq!(hero.speed, 6);
    }

    #[test]
    fn test_character_levels_at_most_once() {
        let mut hero = Character::new("Hero");
        hero.gain_experience(10_000);
        assert_eq!(hero.level, 2);
    }

    #[test]
    fn test_defeat_recovery_floor() {
        assert_eq!(defeat_recovery(100), 10);
        assert_eq!(defeat_recovery(5), 1);
        assert_eq!(defeat_recovery(0), 1);
        assert_eq!(defeat_recovery(19), 1);
        assert_eq!(defeat_recovery(25), 2);
    }

    #[test]
    fn test_recover_from_defeat() {
        let mut hero = Character::new("Hero");
        hero.health = 0;
        hero.magic_points = 0;
        hero.recover_from_defeat();
        assert_eq!(hero.health, 10);
        assert_eq!(hero.magic_points, 5);
    }

    #[test]
    fn test_health_clamped_to_max() {
        let mut hero = Character::new("Hero");
        hero.set_health(500);
        assert_eq!(hero.health, hero.max_health);
        hero.spend_magic(500);
        assert_eq!(hero.magic_points, 0);
    }
}
