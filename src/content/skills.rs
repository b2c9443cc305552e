//! # Special Skills
//!
//! The skills equipment grants through its special ability tag.

use crate::combat::{SkillRegistry, SkillType, SpecialSkill};
use crate::game::Element;

pub(super) fn standard_skills() -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    let skills = [
        SpecialSkill::new("flame_strike", "Flame Strike", SkillType::Damage, Element::Fire, 150, 15)
            .with_description("Engulfs the blade in fire")
            .with_cooldown(2),
        SpecialSkill::new("healing_light", "Healing Light", SkillType::Heal, Element::Holy, 120, 20)
            .with_description("Restores health with holy light")
            .with_cooldown(3),
        SpecialSkill::new("venom_strike", "Venom Strike", SkillType::Dot, Element::Poison, 90, 12)
            .with_description("A strike that leaves lingering poison")
            .with_duration(3),
        SpecialSkill::new("vampiric_touch", "Vampiric Touch", SkillType::Lifesteal, Element::Shadow, 110, 18)
            .with_description("Drains the life of the target")
            .with_cooldown(2),
        SpecialSkill::new("war_cry", "War Cry", SkillType::Buff, Element::Physical, 0, 10)
            .with_description("Raises attack for a few turns")
            .with_modifier("Attack", 6)
            .with_duration(3),
        SpecialSkill::new("arcane_shield", "Arcane Shield", SkillType::Shield, Element::Arcane, 0, 15)
            .with_description("A barrier that hardens defenses")
            .with_modifier("Defense", 12)
            .with_modifier("Magic Defense", 12)
            .with_duration(2),
        SpecialSkill::new("curse_of_weakness", "Curse of Weakness", SkillType::Debuff, Element::Shadow, 0, 12)
            .with_description("Saps the target's strength")
            .with_modifier("Attack", -5)
            .with_modifier("Defense", -3)
            .with_duration(3),
    ];
    for skill in skills {
        let tag = skill.id.clone();
        registry.register(&tag, skill);
    }
    registry
}
