//! # Game Module
//!
//! Core data model shared by the combat and crafting engines.
//!
//! This module contains the fundamental building blocks of Runeforge:
//! - Elements, rarities and catalog stat names
//! - Items and the read-only item catalog
//! - Inventory entries and quantity bookkeeping
//! - Characters, crafting skills and typed equipment slots

pub mod character;
pub mod equipment;
pub mod inventory;
pub mod items;

pub use character::*;
pub use equipment::*;
pub use inventory::*;
pub use items::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a catalog item.
pub type ItemId = String;

/// Element tag carried by attacks and resistances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Physical,
    Fire,
    Ice,
    Lightning,
    Poison,
    Holy,
    Shadow,
    Arcane,
}

impl Element {
    /// Returns all 8 elements.
    pub fn all() -> [Element; 8] {
        [
            Element::Physical,
            Element::Fire,
            Element::Ice,
            Element::Lightning,
            Element::Poison,
            Element::Holy,
            Element::Shadow,
            Element::Arcane,
        ]
    }

    /// Magical elements scale with magic attack and are mitigated by magic defense.
    pub fn is_magical(self) -> bool {
        !matches!(self, Element::Physical | Element::Poison)
    }

    /// Display name used in catalog stat names, e.g. "Fire" in "Fire Resistance".
    pub fn name(self) -> &'static str {
        match self {
            Element::Physical => "Physical",
            Element::Fire => "Fire",
            Element::Ice => "Ice",
            Element::Lightning => "Lightning",
            Element::Poison => "Poison",
            Element::Holy => "Holy",
            Element::Shadow => "Shadow",
            Element::Arcane => "Arcane",
        }
    }

    /// Parses an element from its display name (case-insensitive).
    pub fn parse(name: &str) -> Option<Element> {
        Element::all()
            .into_iter()
            .find(|element| element.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Six-tier item quality, ordered from common to mythic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    /// Ordinal tier, 0 for common through 5 for mythic.
    pub fn tier(self) -> u32 {
        self as u32
    }

    /// Builds a rarity from a tier, capping at mythic.
    pub fn from_tier(tier: u32) -> Rarity {
        match tier {
            0 => Rarity::Common,
            1 => Rarity::Uncommon,
            2 => Rarity::Rare,
            3 => Rarity::Epic,
            4 => Rarity::Legendary,
            _ => Rarity::Mythic,
        }
    }

    /// Raises the rarity by `steps` tiers, capping at mythic.
    ///
    /// # Examples
    ///
    /// ```
    /// use runeforge::Rarity;
    ///
    /// assert_eq!(Rarity::Common.boosted(2), Rarity::Rare);
    /// assert_eq!(Rarity::Legendary.boosted(5), Rarity::Mythic);
    /// ```
    pub fn boosted(self, steps: u32) -> Rarity {
        Rarity::from_tier(self.tier().saturating_add(steps))
    }
}

/// A combat stat addressed by a catalog stat name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Attack,
    Defense,
    MagicAttack,
    MagicDefense,
    Speed,
    CritChance,
    CritDamage,
    Resistance(Element),
}

impl StatKind {
    /// Parses catalog names such as "Attack", "Magic Power" or "Fire Resistance".
    ///
    /// Returns None for names that do not feed combat stats (e.g. "Durability").
    ///
    /// # Examples
    ///
    /// ```
    /// use runeforge::{Element, StatKind};
    ///
    /// assert_eq!(StatKind::parse("Magic Power"), Some(StatKind::MagicAttack));
    /// assert_eq!(StatKind::parse("Ice Resistance"), Some(StatKind::Resistance(Element::Ice)));
    /// assert_eq!(StatKind::parse("Durability"), None);
    /// ```
    pub fn parse(name: &str) -> Option<StatKind> {
        let name = name.trim();
        match name {
            "Attack" => Some(StatKind::Attack),
            "Defense" => Some(StatKind::Defense),
            "Magic Power" => Some(StatKind::MagicAttack),
            "Magic Defense" => Some(StatKind::MagicDefense),
            "Speed" => Some(StatKind::Speed),
            "Crit Chance" => Some(StatKind::CritChance),
            "Crit Damage" => Some(StatKind::CritDamage),
            _ => name
                .strip_suffix(" Resistance")
                .and_then(Element::parse)
                .map(StatKind::Resistance),
        }
    }
}
