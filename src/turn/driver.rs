//! Async pacing around the turn controller.
//!
//! The controller is synchronous and never waits. The driver awaits the
//! host's animation after each resolved action, sleeps for the settling
//! delay before the next phase is chosen, and runs the enemy's turn.

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use super::controller::TurnController;
use super::enemy::{EnemyAi, EnemyIntent};
use crate::combat::ResolvedAction;
use crate::core::{Phase, Result};

/// Presentation hooks the driver awaits.
#[async_trait(?Send)]
pub trait BattleHost {
    /// Play the animation for one resolved action.
    async fn animate_action(&mut self, _resolved: &ResolvedAction) -> Result<()> {
        Ok(())
    }
}

/// Host with no animations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAnimation;

impl BattleHost for NoAnimation {}

/// Runs a battle's phases with host pacing and an enemy AI.
pub struct BattleDriver<H, E> {
    controller: TurnController,
    host: H,
    enemy: E,
}

impl<H, E> BattleDriver<H, E>
where
    H: BattleHost,
    E: EnemyAi,
{
    pub fn new(controller: TurnController, host: H, enemy: E) -> Self {
        Self {
            controller,
            host,
            enemy,
        }
    }

    pub fn controller(&self) -> &TurnController {
        &self.controller
    }

    /// Mutable access for queueing cards and applying scrolls.
    pub fn controller_mut(&mut self) -> &mut TurnController {
        &mut self.controller
    }

    pub fn into_inner(self) -> (TurnController, H, E) {
        (self.controller, self.host, self.enemy)
    }

    /// Resolve and animate one action. Returns `false` once the batch is done.
    ///
    /// The action is resolved before the host animates it, so a host error
    /// never leaves it pending.
    pub async fn resolve_next(&mut self) -> Result<bool> {
        let Some(resolved) = self.controller.resolve_next() else {
            return Ok(false);
        };
        self.host.animate_action(&resolved).await?;
        Ok(true)
    }

    /// End the player's turn and play it out until the player acts again.
    ///
    /// Resolves the queue, waits the settling delay, then either repeats the
    /// player turn or runs the enemy's turn. Returns the phase the battle
    /// rests in afterwards (normally `PlayerTurn`).
    ///
    /// Called during `Resolving`, it resumes an interrupted resolution. A
    /// failed host animation does not stop resolution: the rest of the batch
    /// and the phase change still happen, then the first host error is
    /// returned. In `EnemyTurn` nothing happens and the phase is returned.
    #[instrument(target = "combat::driver", skip(self), fields(turn = self.controller.turn()))]
    pub async fn end_turn(&mut self) -> Result<Phase> {
        match self.controller.phase() {
            Phase::PlayerTurn => {
                self.controller.end_turn();
            }
            Phase::Resolving => {
                debug!(
                    target: "combat::driver",
                    pending = self.controller.pending_resolution(),
                    "resuming resolution"
                );
            }
            phase @ Phase::EnemyTurn => return Ok(phase),
        }

        let mut host_error = None;
        loop {
            match self.resolve_next().await {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    warn!(target: "combat::driver", error = %err, "animation failed, resolution continues");
                    host_error.get_or_insert(err);
                }
            }
        }
        self.settle().await;

        let next = self
            .controller
            .finish_resolution()
            .unwrap_or_else(|| self.controller.phase());

        if next == Phase::EnemyTurn {
            self.run_enemy_turn().await?;
        }

        match host_error {
            Some(err) => Err(err),
            None => Ok(self.controller.phase()),
        }
    }

    /// Plan and carry out the enemy's turn, then hand back to the player.
    ///
    /// Does nothing outside `EnemyTurn`. If the AI fails the battle stays in
    /// `EnemyTurn` so the caller can retry.
    pub async fn run_enemy_turn(&mut self) -> Result<()> {
        if self.controller.phase() != Phase::EnemyTurn {
            return Ok(());
        }

        let view = self.controller.snapshot();
        let intents = self.enemy.plan_turn(&view).await?;
        info!(target: "combat::driver", intents = intents.len(), "enemy turn");

        for intent in intents {
            match intent {
                EnemyIntent::Strike(amount) => {
                    self.controller.strike_player(amount);
                }
                EnemyIntent::Wait => debug!(target: "combat::driver", "enemy waits"),
            }
        }

        self.controller.finish_enemy_turn();
        Ok(())
    }

    async fn settle(&self) {
        let delay = self.controller.config().settle_delay();
        if delay.is_zero() {
            return;
        }
        debug!(target: "combat::driver", ?delay, "settling");
        tokio::time::sleep(delay).await;
    }
}
