//! # Standard Items
//!
//! Crafting ingredients, potions, tools and the equippable gear recipes produce.

use crate::game::{EquipSlot, Item, ItemType, Rarity, CURSED_RING_ID};
use crate::{HEALTH_POTION_ID, MANA_POTION_ID};

pub(super) fn standard_items() -> Vec<Item> {
    vec![
        // Ingredients
        Item::new("iron", "Iron Ingot", ItemType::Ingredient, Rarity::Common),
        Item::new("wood", "Oak Wood", ItemType::Ingredient, Rarity::Common),
        Item::new("leather", "Leather", ItemType::Ingredient, Rarity::Common),
        Item::new("herb", "Healing Herb", ItemType::Ingredient, Rarity::Common),
        Item::new("water", "Spring Water", ItemType::Ingredient, Rarity::Common),
        Item::new("crystal", "Crystal", ItemType::Ingredient, Rarity::Uncommon),
        Item::new("mana_shard", "Mana Shard", ItemType::Magical, Rarity::Uncommon),
        Item::new("fire_essence", "Fire Essence", ItemType::Magical, Rarity::Rare),
        Item::new("shadow_essence", "Shadow Essence", ItemType::Magical, Rarity::Epic),
        Item::new("dragon_scale", "Dragon Scale", ItemType::Ingredient, Rarity::Legendary),
        // Potions
        Item::new(HEALTH_POTION_ID, "Health Potion", ItemType::Potion, Rarity::Common)
            .with_stat("Healing", 50),
        Item::new(MANA_POTION_ID, "Mana Potion", ItemType::Potion, Rarity::Common)
            .with_stat("Mana", 30),
        // Tools
        Item::new("smithing_hammer", "Smithing Hammer", ItemType::Tool, Rarity::Common)
            .with_stat("Durability", 100),
        // Weapons
        Item::new("iron_sword", "Iron Sword", ItemType::Weapon, Rarity::Common)
            .with_slot(EquipSlot::Weapon)
            .with_stat("Attack", 8),
        Item::new("flame_blade", "Flame Blade", ItemType::Weapon, Rarity::Rare)
            .with_slot(EquipSlot::Weapon)
            .with_stat("Attack", 12)
            .with_stat("Fire Resistance", 15)
            .with_ability("flame_strike"),
        Item::new("crystal_staff", "Crystal Staff", ItemType::Weapon, Rarity::Rare)
            .with_slot(EquipSlot::Weapon)
            .with_stat("Magic Power", 15)
            .with_ability("healing_light"),
        Item::new("venom_dagger", "Venom Dagger", ItemType::Weapon, Rarity::Uncommon)
            .with_slot(EquipSlot::Weapon)
            .with_stat("Attack", 6)
            .with_stat("Speed", 4)
            .with_ability("venom_strike"),
        Item::new("shadow_blade", "Shadow Blade", ItemType::Weapon, Rarity::Epic)
            .with_slot(EquipSlot::Weapon)
            .with_stat("Attack", 16)
            .with_stat("Crit Chance", 10)
            .with_ability("vampiric_touch"),
        // Armor
        Item::new("leather_cap", "Leather Cap", ItemType::Armor, Rarity::Common)
            .with_slot(EquipSlot::Head)
            .with_stat("Defense", 2),
        Item::new("iron_chestplate", "Iron Chestplate", ItemType::Armor, Rarity::Uncommon)
            .with_slot(EquipSlot::Chest)
            .with_stat("Defense", 10)
            .with_stat("Speed", -2),
        Item::new("leather_boots", "Leather Boots", ItemType::Armor, Rarity::Common)
            .with_slot(EquipSlot::Feet)
            .with_stat("Defense", 2)
            .with_stat("Speed", 2),
        Item::new("war_gauntlets", "War Gauntlets", ItemType::Armor, Rarity::Rare)
            .with_slot(EquipSlot::Hands)
            .with_stat("Attack", 3)
            .with_ability("war_cry"),
        Item::new("dragon_shield", "Dragon Shield", ItemType::Armor, Rarity::Legendary)
            .with_slot(EquipSlot::Offhand)
            .with_stat("Defense", 18)
            .with_stat("Fire Resistance", 40)
            .with_ability("arcane_shield"),
        // Accessories
        Item::new("crystal_amulet", "Crystal Amulet", ItemType::Accessory, Rarity::Uncommon)
            .with_slot(EquipSlot::Neck)
            .with_stat("Magic Defense", 6)
            .with_stat("Arcane Resistance", 10),
        Item::new("ring_of_power", "Ring of Power", ItemType::Accessory, Rarity::Rare)
            .with_slot(EquipSlot::Ring)
            .with_stat("Attack", 4)
            .with_stat("Crit Damage", 25),
        Item::new(CURSED_RING_ID, "Cursed Ring", ItemType::Accessory, Rarity::Epic)
            .with_slot(EquipSlot::Ring)
            .with_stat("Magic Power", 10)
            .with_stat("Holy Resistance", -20)
            .with_ability("curse_of_weakness"),
    ]
}
