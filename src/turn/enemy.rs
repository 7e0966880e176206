//! Asynchronous source of enemy intent.
//!
//! Hosts plug in an [`EnemyAi`] so a battle can run against scripted
//! fixtures, remote opponents, or the seeded [`RollingEnemy`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::view::BattleView;
use crate::core::{CombatRng, Result};

/// One thing the enemy does on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyIntent {
    /// Hit the player for this much, before damage hooks.
    Strike(u32),
    Wait,
}

/// Decides the enemy's turn from a read-only snapshot.
///
/// Futures are not required to be `Send`; a battle lives on the UI thread.
#[async_trait(?Send)]
pub trait EnemyAi {
    /// Intents for the turn, carried out in order.
    async fn plan_turn(&mut self, view: &BattleView) -> Result<Vec<EnemyIntent>>;
}

/// An enemy that always waits. Useful for tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassiveEnemy;

#[async_trait(?Send)]
impl EnemyAi for PassiveEnemy {
    async fn plan_turn(&mut self, _view: &BattleView) -> Result<Vec<EnemyIntent>> {
        Ok(vec![EnemyIntent::Wait])
    }
}

/// Strikes for a seeded random amount, sometimes holding back.
#[derive(Clone, Debug)]
pub struct RollingEnemy {
    rng: CombatRng,
    min_damage: u32,
    max_damage: u32,
    strikes: usize,
    /// Relative weight of waiting instead of striking (striking weighs 100).
    wait_weight: u32,
}

impl RollingEnemy {
    #[must_use]
    pub fn new(rng: CombatRng, min_damage: u32, max_damage: u32) -> Self {
        Self {
            rng,
            min_damage,
            max_damage,
            strikes: 1,
            wait_weight: 0,
        }
    }

    /// Number of intents planned per turn.
    #[must_use]
    pub fn with_strikes(mut self, strikes: usize) -> Self {
        self.strikes = strikes;
        self
    }

    #[must_use]
    pub fn with_wait_weight(mut self, weight: u32) -> Self {
        self.wait_weight = weight;
        self
    }
}

#[async_trait(?Send)]
impl EnemyAi for RollingEnemy {
    async fn plan_turn(&mut self, _view: &BattleView) -> Result<Vec<EnemyIntent>> {
        let intents = (0..self.strikes)
            .map(|_| match self.rng.choose_weighted(&[100, self.wait_weight]) {
                Some(1) => EnemyIntent::Wait,
                _ => EnemyIntent::Strike(self.rng.roll(self.min_damage, self.max_damage)),
            })
            .collect();
        Ok(intents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BattleConfig;
    use crate::turn::TurnController;

    fn view() -> BattleView {
        TurnController::new(BattleConfig::default()).unwrap().snapshot()
    }

    #[tokio::test]
    async fn test_rolling_enemy_is_deterministic() {
        let view = view();
        let mut a = RollingEnemy::new(CombatRng::new(3), 4, 12).with_strikes(5);
        let mut b = RollingEnemy::new(CombatRng::new(3), 4, 12).with_strikes(5);

        let plan_a = a.plan_turn(&view).await.unwrap();
        assert_eq!(plan_a, b.plan_turn(&view).await.unwrap());
        assert_eq!(plan_a.len(), 5);
        for intent in plan_a {
            match intent {
                EnemyIntent::Strike(n) => assert!((4..=12).contains(&n)),
                EnemyIntent::Wait => panic!("wait weight is zero"),
            }
        }
    }

    #[tokio::test]
    async fn test_passive_enemy_waits() {
        let plan = PassiveEnemy.plan_turn(&view()).await.unwrap();
        assert_eq!(plan, vec![EnemyIntent::Wait]);
    }
}
