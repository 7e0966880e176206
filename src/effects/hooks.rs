//! Hook contracts.
//!
//! A hook is an engine-defined extension point. Each effect declares which
//! hooks it participates in as plain data; the registry folds the declared
//! hooks of every active effect and hands the net outcome back to the
//! caller. Four hooks exist:
//!
//! | Hook | Fired by | Outcome |
//! |---|---|---|
//! | cost | cost queries | optional cost override |
//! | damage | damage pipeline | [`DamageOutcome`] |
//! | phase | end of resolution | [`PhaseOverride`] |
//! | queue | queue insertion/removal | [`QueueOutcome`] |

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::kind::EffectKind;
use crate::core::Phase;

/// Who a damage event is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTarget {
    /// Enemy-dealt damage to the player.
    Player,
    /// Player-sourced damage to the enemy.
    Enemy,
}

/// Cost hook declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CostHook {
    /// Cost is zero while the queue holds at most `threshold` actions.
    FreeWhileQueueAtMost(usize),
}

impl CostHook {
    /// Override for `base_cost` at the given queue length, if any.
    #[must_use]
    pub fn evaluate(self, _base_cost: u32, queue_length: usize) -> Option<u32> {
        match self {
            CostHook::FreeWhileQueueAtMost(threshold) => {
                (queue_length <= threshold).then_some(0)
            }
        }
    }
}

/// Damage hook declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageHook {
    /// Multiply player-sourced damage.
    MultiplyOutgoing(u32),
    /// Cancel enemy damage to the player.
    SuppressIncoming,
}

impl DamageHook {
    /// Fold this hook into a running outcome.
    #[must_use]
    pub fn fold(self, target: DamageTarget, outcome: DamageOutcome) -> DamageOutcome {
        match (self, target) {
            (DamageHook::MultiplyOutgoing(factor), DamageTarget::Enemy) => DamageOutcome {
                amount: outcome.amount.saturating_mul(factor),
                ..outcome
            },
            (DamageHook::SuppressIncoming, DamageTarget::Player) => DamageOutcome::suppressed(),
            _ => outcome,
        }
    }
}

/// Phase hook declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseHook {
    /// Once, send the end of resolution back to `PlayerTurn`.
    RepeatPlayerTurn,
}

/// Queue hook declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueHook {
    /// Charge `amount` self-damage per insertion while the queue holds at
    /// most `threshold` actions; release the effect once it grows past.
    SelfDamageWhileQueueAtMost { threshold: usize, amount: u32 },
}

/// What a queue hook asks for on one insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueHookResult {
    /// Inflict this much self-damage.
    Charge(u32),
    /// The effect has run its course and should be removed.
    Release,
}

impl QueueHook {
    /// Evaluate against the post-insertion queue length.
    #[must_use]
    pub fn on_insert(self, queue_length: usize) -> QueueHookResult {
        match self {
            QueueHook::SelfDamageWhileQueueAtMost { threshold, amount } => {
                if queue_length <= threshold {
                    QueueHookResult::Charge(amount)
                } else {
                    QueueHookResult::Release
                }
            }
        }
    }
}

/// Net result of the damage hooks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub amount: u32,
    pub suppressed: bool,
}

impl DamageOutcome {
    /// Unmodified damage.
    #[must_use]
    pub const fn unchanged(amount: u32) -> Self {
        Self {
            amount,
            suppressed: false,
        }
    }

    /// Damage that never lands.
    #[must_use]
    pub const fn suppressed() -> Self {
        Self {
            amount: 0,
            suppressed: true,
        }
    }
}

/// Net result of the phase hooks at the end of resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOverride {
    /// Phase to enter instead of the default.
    pub next: Option<Phase>,
    /// Effect that asked for the override, announced to observers.
    pub granted_by: Option<EffectKind>,
}

/// How the queue changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueueChange {
    /// An action was appended; `len` is the post-insertion length.
    Inserted { len: usize },
    /// An action was removed; `len` is the post-removal length.
    Removed { len: usize },
}

impl QueueChange {
    /// Post-change queue length.
    #[must_use]
    pub const fn len(self) -> usize {
        match self {
            QueueChange::Inserted { len } | QueueChange::Removed { len } => len,
        }
    }
}

/// Self-damage an effect charges for a queue insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfCharge {
    pub kind: EffectKind,
    pub amount: u32,
}

/// Net result of the queue hooks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueOutcome {
    /// Self-damage to inflict, one entry per charging effect.
    pub self_damage: SmallVec<[SelfCharge; 1]>,
    /// Effects removed by this change.
    pub released: SmallVec<[EffectKind; 2]>,
}

impl QueueOutcome {
    /// Sum of all self-damage charges.
    #[must_use]
    pub fn total_self_damage(&self) -> u32 {
        self.self_damage
            .iter()
            .fold(0u32, |acc, charge| acc.saturating_add(charge.amount))
    }

    /// Whether nothing happened.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.self_damage.is_empty() && self.released.is_empty()
    }
}
