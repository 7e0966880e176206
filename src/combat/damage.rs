//! Damage pipeline.
//!
//! All hit point changes go through here. Incoming and outgoing damage
//! consult the damage hooks; self-inflicted damage (Arcane Debt's toll)
//! skips them, so a ward never cancels it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::effects::{DamageTarget, EffectRegistry};

/// Hit points of one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitals {
    pub hp: u32,
    pub max_hp: u32,
}

impl Vitals {
    /// Full health.
    #[must_use]
    pub const fn new(max_hp: u32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    /// Lose `amount` hit points, saturating at zero.
    pub fn take(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    /// Hit points lost so far.
    #[must_use]
    pub const fn missing(&self) -> u32 {
        self.max_hp.saturating_sub(self.hp)
    }

    /// Whether this side is at zero.
    #[must_use]
    pub const fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

/// Where a damage event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Enemy damage to the player.
    Incoming,
    /// Player damage to the enemy.
    Outgoing,
    /// Damage the player deals to themself.
    SelfInflicted,
}

/// What one damage application did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    pub kind: DamageKind,

    /// Amount before effects.
    pub requested: u32,

    /// Amount applied after effects.
    pub dealt: u32,

    /// A hook cancelled the damage outright.
    pub suppressed: bool,
}

/// Applies damage to the player and enemy, consulting damage hooks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DamagePipeline {
    player: Vitals,
    enemy: Vitals,
}

impl DamagePipeline {
    /// Both sides at full health.
    #[must_use]
    pub fn new(player_hp: u32, enemy_hp: u32) -> Self {
        Self {
            player: Vitals::new(player_hp),
            enemy: Vitals::new(enemy_hp),
        }
    }

    /// Player hit points.
    #[must_use]
    pub fn player(&self) -> Vitals {
        self.player
    }

    /// Enemy hit points.
    #[must_use]
    pub fn enemy(&self) -> Vitals {
        self.enemy
    }

    /// Enemy damage to the player. Suppressed damage applies nothing.
    pub fn apply_to_player(&mut self, effects: &EffectRegistry, amount: u32) -> DamageReport {
        let outcome = effects.query_damage(DamageTarget::Player, amount);
        if !outcome.suppressed {
            self.player.take(outcome.amount);
        }

        let report = DamageReport {
            kind: DamageKind::Incoming,
            requested: amount,
            dealt: outcome.amount,
            suppressed: outcome.suppressed,
        };
        debug!(
            target: "combat::damage",
            requested = amount,
            dealt = report.dealt,
            suppressed = report.suppressed,
            player_hp = self.player.hp,
            "player hit"
        );
        report
    }

    /// Player damage to the enemy. Never suppressed.
    pub fn apply_from_player(&mut self, effects: &EffectRegistry, amount: u32) -> DamageReport {
        let dealt = effects.query_damage(DamageTarget::Enemy, amount).amount;
        self.enemy.take(dealt);

        debug!(
            target: "combat::damage",
            requested = amount,
            dealt,
            enemy_hp = self.enemy.hp,
            "enemy hit"
        );
        DamageReport {
            kind: DamageKind::Outgoing,
            requested: amount,
            dealt,
            suppressed: false,
        }
    }

    /// Damage the player inflicts on themself; no hook applies.
    pub fn apply_self_inflicted(&mut self, amount: u32) -> DamageReport {
        self.player.take(amount);

        debug!(
            target: "combat::damage",
            amount,
            player_hp = self.player.hp,
            "self-inflicted damage"
        );
        DamageReport {
            kind: DamageKind::SelfInflicted,
            requested: amount,
            dealt: amount,
            suppressed: false,
        }
    }
}
