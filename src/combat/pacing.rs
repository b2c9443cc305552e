//! # Turn Pacing
//!
//! Runs the enemy's turn after a presentation delay. The delay is owned by the session's
//! config and can be cancelled, in which case nothing is resolved.

use super::{CombatEvent, CombatPhase, CombatSession, PlayerAction};
use crate::utils::RandomSource;
use log::debug;
use std::time::Duration;
use tokio::sync::oneshot;

/// Cancels a pending paced enemy turn.
#[derive(Debug)]
pub struct TurnCanceller {
    sender: oneshot::Sender<()>,
}

impl TurnCanceller {
    /// Creates a canceller and the receiver to hand to [`paced_enemy_turn`].
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Cancels the pending turn. Returns false if it already resolved.
    pub fn cancel(self) -> bool {
        self.sender.send(()).is_ok()
    }
}

/// Waits for the configured enemy turn delay, then runs the enemy's turn.
///
/// Returns None without touching the session if it is not the enemy's turn or `cancel`
/// fires first. Dropping the canceller does not cancel.
pub async fn paced_enemy_turn(
    session: &mut CombatSession,
    rng: &mut impl RandomSource,
    cancel: oneshot::Receiver<()>,
) -> Option<Vec<CombatEvent>> {
    if session.phase() != CombatPhase::EnemyTurn {
        return None;
    }

    let delay = Duration::from_millis(session.config().enemy_turn_delay_ms);
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        Ok(()) = cancel => {
            debug!("Enemy turn cancelled for combat {}", session.id());
            return None;
        }
    }

    Some(session.enemy_turn(rng))
}

/// Runs the player's action, then the paced enemy turn if the turn passed.
pub async fn paced_round(
    session: &mut CombatSession,
    action: &PlayerAction,
    rng: &mut impl RandomSource,
    cancel: oneshot::Receiver<()>,
) -> Vec<CombatEvent> {
    let mut events = session.player_action(action, rng);
    if let Some(enemy_events) = paced_enemy_turn(session, rng, cancel).await {
        events.extend(enemy_events);
    }
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CombatConfig;
    use crate::utils::ScriptedRandom;
    use crate::{Character, EnemyTemplate, ItemCatalog, SkillRegistry};

    fn fast_enemy() -> EnemyTemplate {
        EnemyTemplate {
            id: "bat".to_string(),
            name: "Bat".to_string(),
            description: String::new(),
            level: 1,
            health: 20,
            magic_points: 0,
            attack: 6,
            defense: 0,
            magic_attack: 0,
            magic_defense: 0,
            speed: 50,
            crit_chance: 5,
            crit_damage: 150,
            resistances: Default::default(),
            skills: Vec::new(),
        }
    }

    fn session_with_delay(delay_ms: u64) -> CombatSession {
        let config = CombatConfig {
            enemy_turn_delay_ms: delay_ms,
            ..CombatConfig::default()
        };
        let mut session = CombatSession::new(config);
        session
            .start(
                &Character::new("Hero"),
                &ItemCatalog::new(),
                &SkillRegistry::new(),
                &fast_enemy(),
            )
            .unwrap();
        session
    }

    #[test]
    fn test_paced_turn_resolves_after_delay() {
        let mut session = session_with_delay(5);
        let mut rng = ScriptedRandom::new(vec![]);
        let (_canceller, receiver) = TurnCanceller::new();
        let events =
            tokio_test::block_on(paced_enemy_turn(&mut session, &mut rng, receiver)).unwrap();
        assert!(!events.is_empty());
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
    }

    #[test]
    fn test_cancelled_turn_changes_nothing() {
        let mut session = session_with_delay(60_000);
        let mut rng = ScriptedRandom::new(vec![]);
        let (canceller, receiver) = TurnCanceller::new();
        assert!(canceller.cancel());
        let events = tokio_test::block_on(paced_enemy_turn(&mut session, &mut rng, receiver));
        assert!(events.is_none());
        assert_eq!(session.phase(), CombatPhase::EnemyTurn);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_wrong_phase_returns_none() {
        let mut session = CombatSession::default();
        let mut rng = ScriptedRandom::new(vec![]);
        let (_canceller, receiver) = TurnCanceller::new();
        let events = tokio_test::block_on(paced_enemy_turn(&mut session, &mut rng, receiver));
        assert!(events.is_none());
    }
}
