//! Integration tests for loading engine configuration from disk.

use runeforge::{Character, CombatSession, EngineConfig, RuneforgeError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"{{
            "ring_slots": 10,
            "combat": {{ "flee_chance": 0.75, "enemy_turn_delay_ms": 0 }},
            "crafting": {{ "max_success_chance": 90.0 }}
        }}"#
    )
    .expect("Failed to write config");

    let config = EngineConfig::from_json_file(file.path()).expect("Failed to load config");
    assert_eq!(config.ring_slots, 10);
    assert_eq!(config.combat.flee_chance, 0.75);
    assert_eq!(config.combat.enemy_special_chance, 0.3);
    assert_eq!(config.crafting.max_success_chance, 90.0);
    assert_eq!(config.crafting.min_success_chance, 5.0);

    let hero = Character::with_ring_slots("Hero", config.ring_slots);
    assert_eq!(hero.equipment.ring_capacity(), 10);
    let session = CombatSession::new(config.combat.clone());
    assert_eq!(session.config().flee_chance, 0.75);
}

#[test]
fn test_missing_config_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = EngineConfig::from_json_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(RuneforgeError::Io(_))));
}

#[test]
fn test_malformed_config_file() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(file, "ring_slots = 4").expect("Failed to write config");
    let result = EngineConfig::from_json_file(file.path());
    assert!(matches!(result, Err(RuneforgeError::Serde(_))));
}
