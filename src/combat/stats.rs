//! # Stat Aggregation
//!
//! Derives a flat combat stat block from character attributes plus equipped items.

use super::{CombatEntity, CombatStats, SkillRegistry};
use crate::game::{Character, Item, ItemCatalog};
use crate::RuneforgeResult;
use log::debug;

/// Builds the combat stats for a character wearing `equipped`.
///
/// Base values: attack = strength x 2, defense = strength, magic attack = spellcraft x 3,
/// magic defense = magicworking x 2, speed = speed x 2. Item stat bonuses are then added by
/// name, and any item whose special ability is registered contributes its skill.
///
/// # Examples
///
/// ```
/// use runeforge::{aggregate_stats, Character, SkillRegistry};
///
/// let hero = Character::new("Hero");
/// let stats = aggregate_stats(&hero, &[], &SkillRegistry::new());
/// assert_eq!(stats.attack, 10);
/// assert_eq!(stats.crit_damage, 150);
/// ```
pub fn aggregate_stats(
    character: &Character,
    equipped: &[&Item],
    registry: &SkillRegistry,
) -> CombatStats {
    let mut stats = CombatStats::new();
    stats.attack = character.strength as i32 * 2;
    stats.defense = character.strength as i32;
    stats.magic_attack = character.skills.spellcraft.level as i32 * 3;
    stats.magic_defense = character.skills.magicworking.level as i32 * 2;
    stats.speed = character.speed as i32 * 2;

    for item in equipped {
        stats.apply_named(&item.stats);
        if let Some(skill) = item
            .special_ability
            .as_deref()
            .and_then(|tag| registry.lookup(tag))
        {
            stats.special_skills.push(skill.clone());
        }
    }

    debug!(
        "Aggregated stats for {}: atk {} def {} matk {} mdef {} spd {}",
        character.name,
        stats.attack,
        stats.defense,
        stats.magic_attack,
        stats.magic_defense,
        stats.speed
    );
    stats
}

/// Resolves the character's equipped item ids through the catalog.
///
/// Unknown ids are an error rather than being skipped.
pub fn equipped_items<'a>(
    character: &Character,
    catalog: &'a ItemCatalog,
) -> RuneforgeResult<Vec<&'a Item>> {
    character
        .equipment
        .equipped()
        .into_iter()
        .map(|(_, id)| catalog.get(id))
        .collect()
}

/// Builds the player's combat entity from the live character and its equipment.
pub fn player_entity(
    character: &Character,
    catalog: &ItemCatalog,
    registry: &SkillRegistry,
) -> RuneforgeResult<CombatEntity> {
    let items = equipped_items(character, catalog)?;
    let stats = aggregate_stats(character, &items, registry);
    Ok(CombatEntity {
        name: character.name.clone(),
        level: character.level,
        health: character.health,
        max_health: character.max_health,
        magic_points: character.magic_points,
        max_magic_points: character.max_magic_points,
        stats,
        status_effects: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{EquipSlot, Element, Inventory, ItemType, Rarity};
    use crate::{equip_item, SkillType, SpecialSkill};

    fn registry() -> SkillRegistry {
        let mut registry = SkillRegistry::new();
        registry.register(
            "flame_strike",
            SpecialSkill::new("flame_strike", "Flame Strike", SkillType::Damage, Element::Fire, 150, 15),
        );
        registry
    }

    #[test]
    fn test_base_stats_from_attributes() {
        let mut hero = Character::new("Hero");
        hero.strength = 10;
        hero.speed = 6;
        hero.skills.spellcraft.level = 4;
        hero.skills.magicworking.level = 3;

        let stats = aggregate_stats(&hero, &[], &SkillRegistry::new());
        assert_eq!(stats.attack, 20);
        assert_eq!(stats.defense, 10);
        assert_eq!(stats.magic_attack, 12);
        assert_eq!(stats.magic_defense, 6);
        assert_eq!(stats.speed, 12);
        assert_eq!(stats.crit_chance, 5);
        assert_eq!(stats.crit_damage, 150);
        assert!(stats.special_skills.is_empty());
    }

    #[test]
    fn test_item_bonuses_and_skills() {
        let hero = Character::new("Hero");
        let blade = Item::new("flame_blade", "Flame Blade", ItemType::Weapon, Rarity::Rare)
            .with_stat("Attack", 8)
            .with_stat("Magic Power", 4)
            .with_stat("Crit Chance", 5)
            .with_stat("Fire Resistance", 15)
            .with_stat("Durability", 50)
            .with_slot(EquipSlot::Weapon)
            .with_ability("flame_strike");
        let charm = Item::new("charm", "Charm", ItemType::Accessory, Rarity::Common)
            .with_stat("Speed", -2)
            .with_ability("not_registered");

        let stats = aggregate_stats(&hero, &[&blade, &charm], &registry());
        assert_eq!(stats.attack, 18);
        assert_eq!(stats.magic_attack, 3 + 4);
        assert_eq!(stats.crit_chance, 10);
        assert_eq!(stats.resistance(Element::Fire), 15);
        assert_eq!(stats.speed, 8);
        assert_eq!(stats.special_skills.len(), 1);
        assert_eq!(stats.special_skills[0].id, "flame_strike");
    }

    #[test]
    fn test_player_entity_uses_live_health() {
        let catalog = ItemCatalog::from_items(vec![Item::new(
            "helm",
            "Helm",
            ItemType::Armor,
            Rarity::Common,
        )
        .with_stat("Defense", 3)
        .with_slot(EquipSlot::Head)]);
        let mut hero = Character::new("Hero");
        let mut inventory = Inventory::from_pairs([("helm", 1)]);
        equip_item(&mut hero, &mut inventory, &catalog, "helm").unwrap();
        hero.health = 42;

        let entity = player_entity(&hero, &catalog, &registry()).unwrap();
        assert_eq!(entity.health, 42);
        assert_eq!(entity.stats.defense, 5 + 3);
    }

    #[test]
    fn test_unknown_equipped_item_is_error() {
        let catalog = ItemCatalog::from_items(vec![Item::new(
            "helm",
            "Helm",
            ItemType::Armor,
            Rarity::Common,
        )
        .with_slot(EquipSlot::Head)]);
        let mut hero = Character::new("Hero");
        let mut inventory = Inventory::from_pairs([("helm", 1)]);
        equip_item(&mut hero, &mut inventory, &catalog, "helm").unwrap();

        let empty = ItemCatalog::new();
        assert!(player_entity(&hero, &empty, &registry()).is_err());
    }
}
