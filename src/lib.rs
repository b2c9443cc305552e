//! # Runeforge
//!
//! Combat resolution and crafting simulation engine for a crafting role-playing game.
//!
//! ## Architecture Overview
//!
//! Runeforge is a pure rules engine. The caller owns the character, inventory and
//! crafting grid, hands them to the engine per action, and applies or renders whatever
//! comes back. The engine is organised around a few key areas:
//!
//! - **Game**: characters, items, inventory and typed equipment slots
//! - **Combat**: stat aggregation, damage resolution, status effects and the
//!   turn-based combat state machine
//! - **Crafting**: 3x3 grid pattern analysis, recipe matching and the crafting resolver
//! - **Content**: the static item, recipe, enemy, skill and pattern-bonus catalogs
//! - **Market**: an injectable listing repository with change subscriptions
//!
//! ## Randomness
//!
//! Every roll goes through [`RandomSource`]. Any `rand` generator works, and tests can
//! replay exact outcomes with [`ScriptedRandom`].

pub mod combat;
pub mod config;
pub mod content;
pub mod crafting;
pub mod game;
pub mod market;
pub mod utils;

// Core module re-exports
pub use combat::*;
pub use content::*;
pub use crafting::*;
pub use game::*;
pub use market::*;
pub use utils::*;

pub use config::{CombatConfig, CraftingConfig, EngineConfig};

/// Core error type for the Runeforge engine.
#[derive(thiserror::Error, Debug)]
pub enum RuneforgeError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// An item id was not found in the item catalog
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// A recipe id was not found in the recipe book
    #[error("Unknown recipe: {0}")]
    UnknownRecipe(String),

    /// An enemy id was not found in the enemy catalog
    #[error("Unknown enemy: {0}")]
    UnknownEnemy(String),

    /// A skill id was not found in the skill registry
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    /// Not enough of an item to complete an operation
    #[error("Insufficient {item_id}: required {required}, available {available}")]
    InsufficientItems {
        item_id: String,
        required: u32,
        available: u32,
    },

    /// Action cannot be performed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Engine state is invalid
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Catalog data references something that does not exist
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Result type used throughout the Runeforge codebase.
pub type RuneforgeResult<T> = Result<T, RuneforgeError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
