//! # Combat Session
//!
//! The turn-based combat state machine.
//!
//! ```text
//! idle -> playerTurn | enemyTurn -> (repeat) -> victory | defeat
//!         playerTurn | enemyTurn -> idle      (successful flee)
//! ```
//!
//! The session owns only transient combat state. The caller's character and inventory are
//! touched exclusively through [`CombatSession::start`], [`CombatSession::collect_rewards`]
//! and [`CombatSession::apply_defeat`].

use super::{
    apply_outcome, basic_attack, player_entity, tick_status_effects, use_special_skill,
    CombatEntity, DamageOutcome, EffectTarget, EnemyTemplate, SkillRegistry, StatusEffect,
};
use crate::config::CombatConfig;
use crate::game::{Character, Element, Inventory, ItemCatalog, ItemId, LevelUp};
use crate::utils::RandomSource;
use crate::{RuneforgeError, RuneforgeResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Item id of the health potion victory drop.
pub const HEALTH_POTION_ID: &str = "health_potion";

/// Item id of the mana potion victory drop.
pub const MANA_POTION_ID: &str = "mana_potion";

/// Status effects an enemy basic attack may inflict.
const ENEMY_STATUS_EFFECTS: [(&str, &str); 3] = [
    ("Poison", "Venom seeps into the wound"),
    ("Bleed", "A deep cut that keeps bleeding"),
    ("Weakness", "Strength drains away"),
];

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CombatPhase {
    Idle,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

/// Something the player can do on their turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    /// Use a special skill by id
    Special(String),
    Flee,
}

/// An action offered to the player this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableAction {
    pub action: PlayerAction,
    pub label: String,
    pub mana_cost: u32,
}

/// Category tag of a combat log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Player,
    Enemy,
    Status,
    System,
    Reward,
}

/// One line of the combat log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLogEntry {
    pub message: String,
    /// Unix time in milliseconds
    pub timestamp: u64,
    pub category: LogCategory,
}

/// How a combat ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// Rewards waiting to be collected after a victory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRewards {
    pub gold: u32,
    pub experience: u32,
    pub items: Vec<(ItemId, u32)>,
}

/// What collecting rewards did to the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardReceipt {
    pub rewards: CombatRewards,
    pub level_up: Option<LevelUp>,
}

/// Events produced by session operations, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// Combat began and `first` acts first
    Started { enemy: String, first: CombatPhase },
    /// An attack or skill was resolved and applied
    ActionResolved {
        actor: String,
        outcome: DamageOutcome,
    },
    /// Status effects ticked on an entity
    StatusTicked { entity: String, damage: u32 },
    /// The player's action was refused; the turn is kept
    ActionRejected { reason: String },
    /// The player failed to flee; the turn passes
    FleeFailed,
    /// Combat is over
    Ended(CombatOutcome),
}

/// Result of one step of enemy or player logic.
enum TurnFlow {
    /// The turn passed to the other side
    Continue,
    /// Nothing happened; the same side keeps the turn
    Hold,
    /// Combat ended
    Ended,
}

/// A single combat between the player and one enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    id: Uuid,
    phase: CombatPhase,
    player: Option<CombatEntity>,
    enemy: Option<CombatEntity>,
    turn: u32,
    log: Vec<CombatLogEntry>,
    available_actions: Vec<AvailableAction>,
    pending_rewards: Option<CombatRewards>,
    config: CombatConfig,
}

impl Default for CombatSession {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatSession {
    /// Creates an idle session.
    pub fn new(config: CombatConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: CombatPhase::Idle,
            player: None,
            enemy: None,
            turn: 0,
            log: Vec::new(),
            available_actions: Vec::new(),
            pending_rewards: None,
            config,
        }
    }

    /// Session id, regenerated on every start.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn player(&self) -> Option<&CombatEntity> {
        self.player.as_ref()
    }

    pub fn enemy(&self) -> Option<&CombatEntity> {
        self.enemy.as_ref()
    }

    /// Completed enemy turns since the start.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &[CombatLogEntry] {
        &self.log
    }

    /// Actions the player may choose; empty outside the player's turn.
    pub fn available_actions(&self) -> &[AvailableAction] {
        &self.available_actions
    }

    pub fn pending_rewards(&self) -> Option<&CombatRewards> {
        self.pending_rewards.as_ref()
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Whether a fight is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.phase, CombatPhase::PlayerTurn | CombatPhase::EnemyTurn)
    }

    /// Starts combat against `enemy`.
    ///
    /// The player entity is built from the live character and its equipment. Whoever has the
    /// higher speed acts first; ties go to the player. Fails if the session is not idle or an
    /// equipped item is missing from the catalog.
    pub fn start(
        &mut self,
        character: &Character,
        items: &ItemCatalog,
        skills: &SkillRegistry,
        enemy: &EnemyTemplate,
    ) -> RuneforgeResult<Vec<CombatEvent>> {
        if self.phase != CombatPhase::Idle {
            return Err(RuneforgeError::InvalidState(format!(
                "Cannot start combat while {:?}",
                self.phase
            )));
        }

        let player = player_entity(character, items, skills)?;
        let enemy_entity = enemy.to_entity();
        let first = if player.stats.speed >= enemy_entity.stats.speed {
            CombatPhase::PlayerTurn
        } else {
            CombatPhase::EnemyTurn
        };

        self.id = Uuid::new_v4();
        self.turn = 0;
        self.log.clear();
        self.pending_rewards = None;
        self.push_log(
            format!("A wild {} appears!", enemy_entity.name),
            LogCategory::System,
        );
        let first_name = if first == CombatPhase::PlayerTurn {
            &player.name
        } else {
            &enemy_entity.name
        };
        self.push_log(format!("{} acts first", first_name), LogCategory::System);

        info!(
            "Combat {} started: {} vs {} ({:?} first)",
            self.id, player.name, enemy_entity.name, first
        );

        let enemy_name = enemy_entity.name.clone();
        self.player = Some(player);
        self.enemy = Some(enemy_entity);
        self.phase = first;
        self.refresh_available_actions();

        Ok(vec![CombatEvent::Started {
            enemy: enemy_name,
            first,
        }])
    }

    /// Executes the player's action.
    ///
    /// Does nothing outside the player's turn or when an entity is missing. An unaffordable
    /// or unknown skill is rejected and the player keeps the turn.
    pub fn player_action(
        &mut self,
        action: &PlayerAction,
        rng: &mut impl RandomSource,
    ) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.phase != CombatPhase::PlayerTurn {
            debug!("Ignoring player action during {:?}", self.phase);
            return events;
        }
        let (mut player, mut enemy) = match (self.player.take(), self.enemy.take()) {
            (Some(player), Some(enemy)) => (player, enemy),
            (player, enemy) => {
                self.player = player;
                self.enemy = enemy;
                return events;
            }
        };

        let flow = self.run_player_action(action, &mut player, &mut enemy, rng, &mut events);

        match flow {
            TurnFlow::Hold => {
                self.player = Some(player);
                self.enemy = Some(enemy);
            }
            TurnFlow::Continue => {
                self.player = Some(player);
                self.enemy = Some(enemy);
                self.phase = CombatPhase::EnemyTurn;
                self.available_actions.clear();
            }
            TurnFlow::Ended => {
                if self.phase != CombatPhase::Idle {
                    self.player = Some(player);
                    self.enemy = Some(enemy);
                }
            }
        }
        events
    }

    fn run_player_action(
        &mut self,
        action: &PlayerAction,
        player: &mut CombatEntity,
        enemy: &mut CombatEntity,
        rng: &mut impl RandomSource,
        events: &mut Vec<CombatEvent>,
    ) -> TurnFlow {
        let outcome = match action {
            PlayerAction::Attack => basic_attack(player, enemy, Element::Physical, rng),
            PlayerAction::Special(skill_id) => {
                let skill = match player.stats.skill(skill_id) {
                    Some(skill) => skill.clone(),
                    None => {
                        return self.reject(format!("Unknown skill: {}", skill_id), events);
                    }
                };
                if !player.can_afford(skill.mana_cost) {
                    return self.reject(format!("Not enough mana to use {}", skill.name), events);
                }
                player.spend_magic(skill.mana_cost);
                use_special_skill(
                    player,
                    enemy,
                    &skill,
                    self.config.default_effect_duration,
                    rng,
                )
            }
            PlayerAction::Flee => {
                if rng.chance(self.config.flee_chance) {
                    info!("{} fled from {}", player.name, enemy.name);
                    self.push_log(
                        format!("{} fled from the battle", player.name),
                        LogCategory::System,
                    );
                    self.reset();
                    events.push(CombatEvent::Ended(CombatOutcome::Fled));
                    return TurnFlow::Ended;
                }
                self.push_log(
                    format!("{} failed to flee!", player.name),
                    LogCategory::System,
                );
                events.push(CombatEvent::FleeFailed);
                return TurnFlow::Continue;
            }
        };

        apply_outcome(&outcome, player, enemy);
        self.push_log(outcome.message.clone(), LogCategory::Player);
        events.push(CombatEvent::ActionResolved {
            actor: player.name.clone(),
            outcome,
        });

        if enemy.is_defeated() {
            self.victory(enemy, rng, events);
            return TurnFlow::Ended;
        }
        TurnFlow::Continue
    }

    fn reject(&mut self, reason: String, events: &mut Vec<CombatEvent>) -> TurnFlow {
        warn!("{}", reason);
        self.push_log(reason.clone(), LogCategory::System);
        events.push(CombatEvent::ActionRejected { reason });
        TurnFlow::Hold
    }

    /// Executes the enemy's turn.
    ///
    /// Status effects tick on the enemy first; the enemy then uses its first special skill
    /// (30% chance, mana permitting) or a basic attack that may inflict a random status
    /// effect. If the player survives, their status effects tick and the turn returns to
    /// the player. Does nothing outside the enemy's turn.
    pub fn enemy_turn(&mut self, rng: &mut impl RandomSource) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.phase != CombatPhase::EnemyTurn {
            debug!("Ignoring enemy turn during {:?}", self.phase);
            return events;
        }
        let (mut player, mut enemy) = match (self.player.take(), self.enemy.take()) {
            (Some(player), Some(enemy)) => (player, enemy),
            (player, enemy) => {
                self.player = player;
                self.enemy = enemy;
                return events;
            }
        };

        let flow = self.run_enemy_turn(&mut player, &mut enemy, rng, &mut events);
        self.player = Some(player);
        self.enemy = Some(enemy);

        if let TurnFlow::Continue = flow {
            self.turn += 1;
            self.phase = CombatPhase::PlayerTurn;
            self.refresh_available_actions();
        }
        events
    }

    fn run_enemy_turn(
        &mut self,
        player: &mut CombatEntity,
        enemy: &mut CombatEntity,
        rng: &mut impl RandomSource,
        events: &mut Vec<CombatEvent>,
    ) -> TurnFlow {
        self.tick_entity(enemy, events);
        if enemy.is_defeated() {
            self.victory(enemy, rng, events);
            return TurnFlow::Ended;
        }

        let wants_special = rng.chance(self.config.enemy_special_chance);
        let skill = enemy
            .stats
            .special_skills
            .first()
            .filter(|skill| enemy.can_afford(skill.mana_cost))
            .cloned();

        let outcome = match skill {
            Some(skill) if wants_special => {
                enemy.spend_magic(skill.mana_cost);
                use_special_skill(
                    enemy,
                    player,
                    &skill,
                    self.config.default_effect_duration,
                    rng,
                )
            }
            _ => {
                let mut outcome = basic_attack(enemy, player, Element::Physical, rng);
                if rng.chance(self.config.enemy_status_chance) {
                    let effect = self.random_enemy_status(enemy.level, rng);
                    outcome.message =
                        format!("{} and inflicts {}", outcome.message, effect.name);
                    outcome.status_effect = Some((EffectTarget::Opponent, effect));
                }
                outcome
            }
        };

        apply_outcome(&outcome, enemy, player);
        self.push_log(outcome.message.clone(), LogCategory::Enemy);
        events.push(CombatEvent::ActionResolved {
            actor: enemy.name.clone(),
            outcome,
        });

        if player.is_defeated() {
            self.defeat(player, events);
            return TurnFlow::Ended;
        }

        self.tick_entity(player, events);
        if player.is_defeated() {
            self.defeat(player, events);
            return TurnFlow::Ended;
        }
        TurnFlow::Continue
    }

    /// Runs the player's action and, if the turn passed, the enemy's turn.
    pub fn resolve_round(
        &mut self,
        action: &PlayerAction,
        rng: &mut impl RandomSource,
    ) -> Vec<CombatEvent> {
        let mut events = self.player_action(action, rng);
        if self.phase == CombatPhase::EnemyTurn {
            events.extend(self.enemy_turn(rng));
        }
        events
    }

    /// Applies pending victory rewards to the character and inventory, then clears the
    /// session.
    ///
    /// The player's remaining health and mana are written back first, so a level-up's full
    /// restore wins. Returns None unless the session is in victory.
    pub fn collect_rewards(
        &mut self,
        character: &mut Character,
        inventory: &mut Inventory,
    ) -> Option<RewardReceipt> {
        if self.phase != CombatPhase::Victory {
            return None;
        }
        let rewards = self.pending_rewards.take()?;

        if let Some(player) = &self.player {
            character.set_health(player.health);
            character.set_magic_points(player.magic_points);
        }
        character.gold = character.gold.saturating_add(rewards.gold);
        let level_up = character.gain_experience(rewards.experience);
        inventory.merge(&rewards.items);

        info!(
            "{} collected {} gold and {} experience",
            character.name, rewards.gold, rewards.experience
        );
        if let Some(level_up) = &level_up {
            info!("{} reached level {}", character.name, level_up.new_level);
        }

        self.reset();
        Some(RewardReceipt { rewards, level_up })
    }

    /// Applies the defeat recovery to the character and clears the session.
    ///
    /// Inventory is untouched. Returns false unless the session is in defeat.
    pub fn apply_defeat(&mut self, character: &mut Character) -> bool {
        if self.phase != CombatPhase::Defeat {
            return false;
        }
        character.recover_from_defeat();
        self.reset();
        true
    }

    fn tick_entity(&mut self, entity: &mut CombatEntity, events: &mut Vec<CombatEvent>) {
        if entity.status_effects.is_empty() {
            return;
        }
        let outcome = tick_status_effects(entity);
        *entity = outcome.entity;
        for message in outcome.messages {
            self.push_log(message, LogCategory::Status);
        }
        events.push(CombatEvent::StatusTicked {
            entity: entity.name.clone(),
            damage: outcome.damage_taken,
        });
    }

    fn random_enemy_status(&self, level: u32, rng: &mut impl RandomSource) -> StatusEffect {
        let (name, description) = ENEMY_STATUS_EFFECTS[rng.index(ENEMY_STATUS_EFFECTS.len())];
        let damage = (level as f64 * 1.5).floor() as u32;
        StatusEffect::damage_over_time(
            name,
            description,
            self.config.enemy_status_duration,
            damage,
        )
    }

    fn victory(
        &mut self,
        enemy: &CombatEntity,
        rng: &mut impl RandomSource,
        events: &mut Vec<CombatEvent>,
    ) {
        let rewards = self.roll_rewards(enemy.level, rng);
        info!(
            "Victory over {}: {} gold, {} experience, {} item drops",
            enemy.name,
            rewards.gold,
            rewards.experience,
            rewards.items.len()
        );
        self.push_log(format!("{} has been defeated!", enemy.name), LogCategory::System);
        self.push_log(
            format!(
                "Rewards: {} gold, {} experience",
                rewards.gold, rewards.experience
            ),
            LogCategory::Reward,
        );
        for (item_id, quantity) in &rewards.items {
            self.push_log(format!("Found {} x{}", item_id, quantity), LogCategory::Reward);
        }

        self.pending_rewards = Some(rewards);
        self.phase = CombatPhase::Victory;
        self.available_actions.clear();
        events.push(CombatEvent::Ended(CombatOutcome::Victory));
    }

    fn defeat(&mut self, player: &CombatEntity, events: &mut Vec<CombatEvent>) {
        info!("{} was defeated", player.name);
        self.push_log(format!("{} has been defeated...", player.name), LogCategory::System);
        self.phase = CombatPhase::Defeat;
        self.available_actions.clear();
        events.push(CombatEvent::Ended(CombatOutcome::Defeat));
    }

    /// Gold, experience and potion drops for beating an enemy of `level`.
    fn roll_rewards(&self, level: u32, rng: &mut impl RandomSource) -> CombatRewards {
        let level = level as f64;
        let gold = (level * 10.0 * (1.0 + rng.next_f64() * 0.5)).floor() as u32;
        let experience = (level * 20.0 * (1.0 + rng.next_f64() * 0.5)).floor() as u32;

        let mut items = Vec::new();
        if rng.chance(self.config.health_potion_drop_chance) {
            items.push((HEALTH_POTION_ID.to_string(), 1));
        }
        if rng.chance(self.config.mana_potion_drop_chance) {
            items.push((MANA_POTION_ID.to_string(), 1));
        }

        CombatRewards {
            gold,
            experience,
            items,
        }
    }

    fn refresh_available_actions(&mut self) {
        self.available_actions.clear();
        if self.phase != CombatPhase::PlayerTurn {
            return;
        }
        let Some(player) = &self.player else {
            return;
        };

        let mut actions = vec![AvailableAction {
            action: PlayerAction::Attack,
            label: "Attack".to_string(),
            mana_cost: 0,
        }];
        actions.extend(
            player
                .stats
                .special_skills
                .iter()
                .filter(|skill| player.can_afford(skill.mana_cost))
                .map(|skill| AvailableAction {
                    action: PlayerAction::Special(skill.id.clone()),
                    label: skill.name.clone(),
                    mana_cost: skill.mana_cost,
                }),
        );
        actions.push(AvailableAction {
            action: PlayerAction::Flee,
            label: "Flee".to_string(),
            mana_cost: 0,
        });
        self.available_actions = actions;
    }

    fn push_log(&mut self, message: String, category: LogCategory) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.log.push(CombatLogEntry {
            message,
            timestamp,
            category,
        });
    }

    /// Back to idle with no entities, actions or rewards. The log is kept for display.
    fn reset(&mut self) {
        self.phase = CombatPhase::Idle;
        self.player = None;
        self.enemy = None;
        self.available_actions.clear();
        self.pending_rewards = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ScriptedRandom;
    use crate::{Item, ItemType, Rarity, SkillType, SpecialSkill};
    use crate::{equip_item, EquipSlot};

    fn goblin() -> EnemyTemplate {
        EnemyTemplate {
            id: "forest_goblin".to_string(),
            name: "Forest Goblin".to_string(),
            description: String::new(),
            level: 2,
            health: 30,
            magic_points: 20,
            attack: 10,
            defense: 8,
            magic_attack: 4,
            magic_defense: 4,
            speed: 15,
            crit_chance: 5,
            crit_damage: 150,
            resistances: Default::default(),
            skills: vec!["sneak_attack".to_string()],
        }
    }

    fn hero() -> Character {
        let mut hero = Character::new("Hero");
        hero.level = 5;
        hero.strength = 10;
        hero.speed = 6;
        hero
    }

    fn started(character: &Character, enemy: &EnemyTemplate) -> CombatSession {
        let mut session = CombatSession::new(CombatConfig::default());
        session
            .start(character, &ItemCatalog::new(), &SkillRegistry::new(), enemy)
            .unwrap();
        session
    }

    #[test]
    fn test_faster_enemy_goes_first() {
        let session = started(&hero(), &goblin());
        assert_eq!(session.phase(), CombatPhase::EnemyTurn);
        assert!(session.available_actions().is_empty());
    }

    #[test]
    fn test_speed_tie_favors_player() {
        let mut enemy = goblin();
        enemy.speed = 12;
        let session = started(&hero(), &enemy);
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
    }

    #[test]
    fn test_cannot_start_twice() {
        let mut session = started(&hero(), &goblin());
        let result = session.start(
            &hero(),
            &ItemCatalog::new(),
            &SkillRegistry::new(),
            &goblin(),
        );
        assert!(matches!(result, Err(RuneforgeError::InvalidState(_))));
    }

    #[test]
    fn test_actions_without_mana_exclude_skills() {
        let catalog = ItemCatalog::from_items(vec![Item::new(
            "flame_blade",
            "Flame Blade",
            ItemType::Weapon,
            Rarity::Rare,
        )
        .with_slot(EquipSlot::Weapon)
        .with_ability("flame_strike")]);
        let mut registry = SkillRegistry::new();
        registry.register(
            "flame_strike",
            SpecialSkill::new("flame_strike", "Flame Strike", SkillType::Damage, Element::Fire, 150, 15),
        );
        let mut character = hero();
        character.speed = 20;
        let mut inventory = Inventory::from_pairs([("flame_blade", 1)]);
        equip_item(&mut character, &mut inventory, &catalog, "flame_blade").unwrap();

        let mut session = CombatSession::default();
        session.start(&character, &catalog, &registry, &goblin()).unwrap();
        assert_eq!(session.available_actions().len(), 3);

        character.magic_points = 0;
        let mut session = CombatSession::default();
        session.start(&character, &catalog, &registry, &goblin()).unwrap();
        let actions: Vec<_> = session
            .available_actions()
            .iter()
            .map(|a| a.action.clone())
            .collect();
        assert_eq!(actions, vec![PlayerAction::Attack, PlayerAction::Flee]);

        // Forcing the skill anyway is rejected and the turn is kept
        let mut rng = ScriptedRandom::new(vec![]);
        let events =
            session.player_action(&PlayerAction::Special("flame_strike".to_string()), &mut rng);
        assert!(matches!(events[0], CombatEvent::ActionRejected { .. }));
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
        assert_eq!(session.enemy().unwrap().health, 30);
        assert_eq!(rng.draws(), 0);
    }

    /// A fast hero carrying one item that grants `skill`, registered under the skill's id.
    fn equipped(
        item: Item,
        skill: SpecialSkill,
        magic_points: u32,
    ) -> (Character, ItemCatalog, SkillRegistry) {
        let item_id = item.id.clone();
        let catalog = ItemCatalog::from_items(vec![item]);
        let mut registry = SkillRegistry::new();
        registry.register(&skill.id.clone(), skill);
        let mut character = hero();
        character.speed = 20;
        let mut inventory = Inventory::from_pairs([(item_id.as_str(), 1)]);
        equip_item(&mut character, &mut inventory, &catalog, &item_id).unwrap();
        character.magic_points = magic_points;
        (character, catalog, registry)
    }

    #[test]
    fn test_special_skill_spends_mana_and_refreshes_actions() {
        let (character, catalog, registry) = equipped(
            Item::new("flame_blade", "Flame Blade", ItemType::Weapon, Rarity::Rare)
                .with_slot(EquipSlot::Weapon)
                .with_stat("Magic Power", 10)
                .with_ability("flame_strike"),
            SpecialSkill::new("flame_strike", "Flame Strike", SkillType::Damage, Element::Fire, 150, 15),
            15,
        );
        let mut session = CombatSession::default();
        session.start(&character, &catalog, &registry, &goblin()).unwrap();
        let before: Vec<_> = session
            .available_actions()
            .iter()
            .map(|a| a.action.clone())
            .collect();
        assert_eq!(
            before,
            vec![
                PlayerAction::Attack,
                PlayerAction::Special("flame_strike".to_string()),
                PlayerAction::Flee
            ]
        );

        // no crit; enemy: no special, no crit, no status
        let mut rng = ScriptedRandom::new(vec![0.99, 0.9, 0.9, 0.9]);
        let events =
            session.resolve_round(&PlayerAction::Special("flame_strike".to_string()), &mut rng);
        assert!(matches!(
            &events[0],
            CombatEvent::ActionResolved { outcome, .. } if outcome.damage == 18
        ));

        let player = session.player().unwrap();
        assert_eq!(player.magic_points, 0);
        assert_eq!(player.health, 92);
        // 13 magic attack * 1.5 vs 4 magic defense
        assert_eq!(session.enemy().unwrap().health, 30 - 18);
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
        assert_eq!(rng.draws(), 4);

        let after: Vec<_> = session
            .available_actions()
            .iter()
            .map(|a| a.action.clone())
            .collect();
        assert_eq!(after, vec![PlayerAction::Attack, PlayerAction::Flee]);
    }

    #[test]
    fn test_buff_skill_lands_on_player() {
        let (character, catalog, registry) = equipped(
            Item::new("war_gauntlets", "War Gauntlets", ItemType::Armor, Rarity::Rare)
                .with_slot(EquipSlot::Hands)
                .with_ability("rally"),
            SpecialSkill::new("rally", "Rally", SkillType::Buff, Element::Physical, 0, 5)
                .with_modifier("Attack", 5),
            50,
        );
        let mut session = CombatSession::default();
        session.start(&character, &catalog, &registry, &goblin()).unwrap();

        let mut rng = ScriptedRandom::new(vec![]);
        session.player_action(&PlayerAction::Special("rally".to_string()), &mut rng);
        assert_eq!(rng.draws(), 0);
        assert_eq!(session.phase(), CombatPhase::EnemyTurn);
        assert_eq!(session.enemy().unwrap().health, 30);

        let player = session.player().unwrap();
        assert_eq!(player.magic_points, 45);
        assert_eq!(player.status_effects.len(), 1);
        assert_eq!(player.status_effects[0].name, "Rally");
        assert_eq!(player.status_effects[0].duration, 3);
        assert_eq!(player.effective_stats().attack, 25);
    }

    #[test]
    fn test_enemy_without_mana_falls_back_to_attack() {
        let mut enemy = goblin();
        enemy.magic_points = 5;
        let mut session = started(&hero(), &enemy);
        // special wanted but unaffordable, no crit, no status
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9, 0.9]);
        let events = session.enemy_turn(&mut rng);

        assert_eq!(rng.draws(), 3);
        assert_eq!(session.enemy().unwrap().magic_points, 5);
        assert_eq!(session.player().unwrap().health, 100 - 8);
        assert!(matches!(
            &events[0],
            CombatEvent::ActionResolved { outcome, .. } if outcome.status_effect.is_none()
        ));
        let last = session.log().last().unwrap();
        assert_eq!(last.category, LogCategory::Enemy);
        assert_eq!(last.message, "Forest Goblin attacks Hero for 8 damage");
    }

    #[test]
    fn test_player_attack_passes_turn() {
        let mut enemy = goblin();
        enemy.speed = 1;
        let mut session = started(&hero(), &enemy);
        let mut rng = ScriptedRandom::new(vec![0.99]);
        let events = session.player_action(&PlayerAction::Attack, &mut rng);
        assert_eq!(events.len(), 1);
        assert_eq!(session.enemy().unwrap().health, 30 - 17);
        assert_eq!(session.phase(), CombatPhase::EnemyTurn);
    }

    #[test]
    fn test_enemy_basic_attack_and_return_to_player() {
        let mut session = started(&hero(), &goblin());
        // special roll fails, no crit, no status
        let mut rng = ScriptedRandom::new(vec![0.9, 0.9, 0.9]);
        let events = session.enemy_turn(&mut rng);
        assert_eq!(events.len(), 1);
        // 10 attack vs 10 defense: 10 * 50/60 = 8.33
        assert_eq!(session.player().unwrap().health, 100 - 8);
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
        assert_eq!(session.turn(), 1);
        assert_eq!(session.available_actions().len(), 2);
    }

    #[test]
    fn test_enemy_uses_special_skill() {
        let mut session = started(&hero(), &goblin());
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9]);
        session.enemy_turn(&mut rng);
        let enemy = session.enemy().unwrap();
        assert_eq!(enemy.magic_points, 10);
        // placeholder skill: 10 * 100% vs defense 10
        assert_eq!(session.player().unwrap().health, 92);
    }

    #[test]
    fn test_enemy_inflicts_status_then_player_ticks() {
        let mut session = started(&hero(), &goblin());
        // no special, no crit, status yes, pick "Bleed"
        let mut rng = ScriptedRandom::new(vec![0.9, 0.9, 0.05, 0.5]);
        let events = session.enemy_turn(&mut rng);
        let player = session.player().unwrap();
        // 8 from the hit, 3 from the first bleed tick
        assert_eq!(player.health, 100 - 8 - 3);
        assert_eq!(player.status_effects.len(), 1);
        assert_eq!(player.status_effects[0].name, "Bleed");
        assert_eq!(player.status_effects[0].duration, 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, CombatEvent::StatusTicked { damage: 3, .. })));
    }

    #[test]
    fn test_flee_success_clears_session() {
        let mut enemy = goblin();
        enemy.speed = 1;
        let mut session = started(&hero(), &enemy);
        let mut rng = ScriptedRandom::new(vec![0.2]);
        let events = session.player_action(&PlayerAction::Flee, &mut rng);
        assert_eq!(events, vec![CombatEvent::Ended(CombatOutcome::Fled)]);
        assert_eq!(session.phase(), CombatPhase::Idle);
        assert!(session.player().is_none());
        assert!(session.enemy().is_none());
    }

    #[test]
    fn test_flee_failure_passes_turn() {
        let mut enemy = goblin();
        enemy.speed = 1;
        let mut session = started(&hero(), &enemy);
        let mut rng = ScriptedRandom::new(vec![0.7]);
        let events = session.player_action(&PlayerAction::Flee, &mut rng);
        assert_eq!(events, vec![CombatEvent::FleeFailed]);
        assert_eq!(session.phase(), CombatPhase::EnemyTurn);
    }

    #[test]
    fn test_victory_and_reward_collection() {
        let mut enemy = goblin();
        enemy.speed = 1;
        enemy.health = 10;
        let mut character = hero();
        character.experience_to_next_level = 50;
        let mut session = started(&character, &enemy);

        // no crit; gold roll 0.5, exp roll 0.0, health potion yes, mana potion no
        let mut rng = ScriptedRandom::new(vec![0.99, 0.5, 0.0, 0.1, 0.9]);
        let events = session.player_action(&PlayerAction::Attack, &mut rng);
        assert!(events.contains(&CombatEvent::Ended(CombatOutcome::Victory)));
        assert_eq!(session.phase(), CombatPhase::Victory);

        let rewards = session.pending_rewards().unwrap().clone();
        assert_eq!(rewards.gold, 25);
        assert_eq!(rewards.experience, 40);
        assert_eq!(rewards.items, vec![(HEALTH_POTION_ID.to_string(), 1)]);

        let mut inventory = Inventory::new();
        let gold_before = character.gold;
        let receipt = session.collect_rewards(&mut character, &mut inventory).unwrap();
        assert!(receipt.level_up.is_none());
        assert_eq!(character.gold, gold_before + 25);
        assert_eq!(character.experience, 40);
        assert_eq!(inventory.quantity_of(HEALTH_POTION_ID), 1);
        assert_eq!(session.phase(), CombatPhase::Idle);
        assert!(session.collect_rewards(&mut character, &mut inventory).is_none());
    }

    #[test]
    fn test_enemy_dies_from_status_before_acting() {
        let mut enemy = goblin();
        enemy.health = 2;
        let mut session = started(&hero(), &enemy);
        if let Some(goblin) = session.enemy.as_mut() {
            goblin.add_status_effect(StatusEffect::damage_over_time("Burn", "Burning", 2, 5));
        }
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.9, 0.9]);
        let events = session.enemy_turn(&mut rng);
        assert_eq!(session.phase(), CombatPhase::Victory);
        assert_eq!(session.player().unwrap().health, 100);
        assert!(!events
            .iter()
            .any(|e| matches!(e, CombatEvent::ActionResolved { .. })));
    }

    #[test]
    fn test_defeat_and_recovery() {
        let mut character = hero();
        character.health = 5;
        let mut session = started(&character, &goblin());
        let mut rng = ScriptedRandom::new(vec![0.9, 0.9, 0.9]);
        let events = session.enemy_turn(&mut rng);
        assert!(events.contains(&CombatEvent::Ended(CombatOutcome::Defeat)));
        assert_eq!(session.phase(), CombatPhase::Defeat);

        // Nothing happens in a finished combat
        assert!(session.player_action(&PlayerAction::Attack, &mut rng).is_empty());

        let inventory = Inventory::from_pairs([("herb", 2)]);
        assert!(session.apply_defeat(&mut character));
        assert_eq!(character.health, 10);
        assert_eq!(character.magic_points, 5);
        assert_eq!(inventory.quantity_of("herb"), 2);
        assert_eq!(session.phase(), CombatPhase::Idle);
        assert!(!session.apply_defeat(&mut character));
    }

    #[test]
    fn test_idle_session_ignores_actions() {
        let mut session = CombatSession::default();
        let mut rng = ScriptedRandom::new(vec![]);
        assert!(session.player_action(&PlayerAction::Attack, &mut rng).is_empty());
        assert!(session.enemy_turn(&mut rng).is_empty());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_log_categories() {
        let mut enemy = goblin();
        enemy.speed = 1;
        let mut session = started(&hero(), &enemy);
        let mut rng = ScriptedRandom::new(vec![0.99, 0.9, 0.9, 0.9]);
        session.resolve_round(&PlayerAction::Attack, &mut rng);
        let categories: Vec<_> = session.log().iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec![
                LogCategory::System,
                LogCategory::System,
                LogCategory::Player,
                LogCategory::Enemy
            ]
        );
        assert!(session.log().iter().all(|e| e.timestamp > 0));
    }
}
