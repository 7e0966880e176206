//! Declarative effect specifications.
//!
//! An [`EffectSpec`] lists the hooks an effect participates in and the rules
//! under which it expires. Specs are plain data: the registry evaluates
//! them, nothing in the engine is replaced or patched while they are active.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::hooks::{CostHook, DamageHook, PhaseHook, QueueHook};
use super::kind::EffectKind;
use crate::core::Phase;

/// Condition under which an active effect is removed automatically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryRule {
    /// When the queued actions have resolved (leaving `Resolving`).
    OnQueueResolved,
    /// When a `PlayerTurn` begins.
    OnNextPlayerTurnStart,
    /// Once `n` actions have been queued under the effect; the next
    /// insertion sees the effect gone.
    AfterNActionsQueued(u32),
    /// Only an explicit `remove`.
    Manual,
}

impl ExpiryRule {
    /// Whether this rule fires on the phase transition `from → to`.
    #[must_use]
    pub fn fires_on_transition(self, from: Phase, to: Phase) -> bool {
        match self {
            ExpiryRule::OnQueueResolved => from == Phase::Resolving && to != Phase::Resolving,
            ExpiryRule::OnNextPlayerTurnStart => to == Phase::PlayerTurn && from != Phase::PlayerTurn,
            ExpiryRule::AfterNActionsQueued(_) | ExpiryRule::Manual => false,
        }
    }
}

/// The full definition of one status effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// Which kind this is. At most one effect per kind is active.
    pub kind: EffectKind,

    pub cost: Option<CostHook>,
    pub damage: Option<DamageHook>,
    pub phase: Option<PhaseHook>,
    pub queue: Option<QueueHook>,

    /// Removal conditions; the first to fire wins. Empty means `Manual`.
    pub expiry: SmallVec<[ExpiryRule; 2]>,
}

impl EffectSpec {
    /// Create a spec with no hooks that only expires manually.
    #[must_use]
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            cost: None,
            damage: None,
            phase: None,
            queue: None,
            expiry: SmallVec::new(),
        }
    }

    /// Set the cost hook (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, hook: CostHook) -> Self {
        self.cost = Some(hook);
        self
    }

    /// Set the damage hook (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, hook: DamageHook) -> Self {
        self.damage = Some(hook);
        self
    }

    /// Set the phase hook (builder pattern).
    #[must_use]
    pub fn with_phase(mut self, hook: PhaseHook) -> Self {
        self.phase = Some(hook);
        self
    }

    /// Set the queue hook (builder pattern).
    #[must_use]
    pub fn with_queue(mut self, hook: QueueHook) -> Self {
        self.queue = Some(hook);
        self
    }

    /// Add an expiry rule (builder pattern).
    #[must_use]
    pub fn expires(mut self, rule: ExpiryRule) -> Self {
        if !self.expiry.contains(&rule) {
            self.expiry.push(rule);
        }
        self
    }

    /// The `AfterNActionsQueued` limit, if the spec has one.
    #[must_use]
    pub fn action_limit(&self) -> Option<u32> {
        self.expiry.iter().find_map(|rule| match rule {
            ExpiryRule::AfterNActionsQueued(n) => Some(*n),
            _ => None,
        })
    }

    /// First rule that fires on `from → to`.
    #[must_use]
    pub fn expiry_on_transition(&self, from: Phase, to: Phase) -> Option<ExpiryRule> {
        self.expiry
            .iter()
            .copied()
            .find(|rule| rule.fires_on_transition(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_resolved_rule() {
        let rule = ExpiryRule::OnQueueResolved;
        assert!(rule.fires_on_transition(Phase::Resolving, Phase::EnemyTurn));
        assert!(rule.fires_on_transition(Phase::Resolving, Phase::PlayerTurn));
        assert!(!rule.fires_on_transition(Phase::PlayerTurn, Phase::Resolving));
        assert!(!rule.fires_on_transition(Phase::EnemyTurn, Phase::PlayerTurn));
    }

    #[test]
    fn test_player_turn_start_rule() {
        let rule = ExpiryRule::OnNextPlayerTurnStart;
        assert!(rule.fires_on_transition(Phase::EnemyTurn, Phase::PlayerTurn));
        assert!(rule.fires_on_transition(Phase::Resolving, Phase::PlayerTurn));
        assert!(!rule.fires_on_transition(Phase::Resolving, Phase::EnemyTurn));
    }

    #[test]
    fn test_manual_rules_never_fire_on_transitions() {
        for (from, to) in [
            (Phase::PlayerTurn, Phase::Resolving),
            (Phase::Resolving, Phase::EnemyTurn),
            (Phase::EnemyTurn, Phase::PlayerTurn),
        ] {
            assert!(!ExpiryRule::Manual.fires_on_transition(from, to));
            assert!(!ExpiryRule::AfterNActionsQueued(1).fires_on_transition(from, to));
        }
    }

    #[test]
    fn test_spec_builder() {
        let spec = EffectSpec::new(EffectKind::ArcaneDebt)
            .with_cost(CostHook::FreeWhileQueueAtMost(3))
            .expires(ExpiryRule::OnQueueResolved)
            .expires(ExpiryRule::AfterNActionsQueued(3))
            .expires(ExpiryRule::OnQueueResolved);

        assert_eq!(spec.expiry.len(), 2);
        assert_eq!(spec.action_limit(), Some(3));
        assert_eq!(
            spec.expiry_on_transition(Phase::Resolving, Phase::EnemyTurn),
            Some(ExpiryRule::OnQueueResolved)
        );
        assert_eq!(spec.expiry_on_transition(Phase::EnemyTurn, Phase::PlayerTurn), None);
    }
}
