//! Read-only battle snapshots for render ticks.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::combat::{ResolvedAction, Vitals};
use crate::core::{Action, Phase};
use crate::effects::{EffectId, EffectKind};

/// A queued action with its live cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedView {
    pub action: Action,
    /// 1-based.
    pub position: usize,
    pub cost: u32,
}

/// An active effect as the HUD shows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectView {
    pub id: EffectId,
    pub kind: EffectKind,
    pub applied_at: Phase,
}

/// Everything the presentation layer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleView {
    pub phase: Phase,
    pub turn: u32,
    pub player: Vitals,
    pub enemy: Vitals,
    pub queued: Vec<QueuedView>,
    /// Most recently applied first.
    pub effects: Vec<EffectView>,
    /// Actions still waiting in the current resolution batch.
    pub pending_resolution: usize,
    /// Every action resolved this battle, oldest first.
    pub resolved: Vector<ResolvedAction>,
}

impl BattleView {
    /// Sum of live costs of the queued actions.
    #[must_use]
    pub fn queued_cost(&self) -> u32 {
        self.queued
            .iter()
            .fold(0u32, |acc, q| acc.saturating_add(q.cost))
    }

    /// Whether `kind` is active.
    #[must_use]
    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }
}
