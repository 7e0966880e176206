//! Effect registry.
//!
//! The registry stores active effects and answers one query per hook by
//! folding the declared hooks of every active effect, most recently applied
//! first. It holds no reference to the turn controller or the action queue:
//! callers pass in the facts a hook needs (queue length, damage target,
//! phase edge) and receive an outcome value they act on themselves.
//!
//! Every removal, whether replaced, explicit, or expired, produces exactly
//! one [`RemovedEffect`] record, collected until [`EffectRegistry::drain_removed`].

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::hooks::{
    DamageOutcome, DamageTarget, PhaseHook, PhaseOverride, QueueChange, QueueHookResult,
    QueueOutcome, SelfCharge,
};
use super::kind::{EffectId, EffectKind};
use super::spec::{EffectSpec, ExpiryRule};
use crate::core::Phase;

/// An effect currently influencing the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// Unique per application.
    pub id: EffectId,

    /// Hooks and expiry rules.
    pub spec: EffectSpec,

    /// Phase the effect was applied in.
    pub applied_at: Phase,

    /// Queue insertions observed while active.
    actions_covered: u32,

    /// One-shot phase request already spent.
    repeat_consumed: bool,
}

impl ActiveEffect {
    /// The effect's kind.
    #[must_use]
    pub fn kind(&self) -> EffectKind {
        self.spec.kind
    }

    /// Queue insertions observed while active.
    #[must_use]
    pub fn actions_covered(&self) -> u32 {
        self.actions_covered
    }
}

/// Why an effect left the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalReason {
    /// Another application of the same kind took its place.
    Replaced,
    /// Explicit `remove`.
    Removed,
    /// An expiry rule fired.
    Expired(ExpiryRule),
    /// Its queue hook reported the effect had run its course.
    Released,
}

/// Cleanup record for a removed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedEffect {
    pub id: EffectId,
    pub kind: EffectKind,
    pub reason: RemovalReason,
}

/// Storage and hook evaluation for active effects.
#[derive(Clone, Debug, Default)]
pub struct EffectRegistry {
    /// Active effects by kind (at most one per kind).
    active: FxHashMap<EffectKind, ActiveEffect>,

    /// Application order, oldest first.
    order: SmallVec<[EffectKind; 4]>,

    /// Cleanup records not yet drained.
    removed: Vec<RemovedEffect>,

    /// Last phase reported through `notify_phase_transition`.
    phase: Phase,

    /// Next effect ID to allocate.
    next_id: u32,
}

impl EffectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect, replacing any active effect of the same kind.
    ///
    /// The replaced effect's cleanup record is emitted before the new one
    /// becomes active.
    pub fn apply(&mut self, spec: EffectSpec) -> EffectId {
        let kind = spec.kind;
        if self.active.contains_key(&kind) {
            self.detach(kind, RemovalReason::Replaced);
        }

        self.next_id += 1;
        let id = EffectId::new(self.next_id);

        info!(
            target: "combat::effects",
            effect = %kind,
            id = id.raw(),
            phase = %self.phase,
            "effect applied"
        );

        self.active.insert(
            kind,
            ActiveEffect {
                id,
                spec,
                applied_at: self.phase,
                actions_covered: 0,
                repeat_consumed: false,
            },
        );
        self.order.push(kind);
        id
    }

    /// Remove the active effect of `kind`.
    ///
    /// Returns whether anything was removed; removing an absent kind is a no-op.
    pub fn remove(&mut self, kind: EffectKind) -> bool {
        self.detach(kind, RemovalReason::Removed).is_some()
    }

    /// Get the active effect of `kind`.
    #[must_use]
    pub fn get(&self, kind: EffectKind) -> Option<&ActiveEffect> {
        self.active.get(&kind)
    }

    /// Check whether `kind` is active.
    #[must_use]
    pub fn contains(&self, kind: EffectKind) -> bool {
        self.active.contains_key(&kind)
    }

    /// Number of active effects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Check if no effect is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active effects, most recently applied first.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.order.iter().rev().filter_map(|kind| self.active.get(kind))
    }

    /// Take the cleanup records emitted since the last drain.
    pub fn drain_removed(&mut self) -> Vec<RemovedEffect> {
        std::mem::take(&mut self.removed)
    }

    // === Hook queries ===

    /// Effective cost of an action.
    ///
    /// The first effect (most recent first) whose cost hook returns an
    /// override wins; otherwise `base_cost`.
    #[must_use]
    pub fn query_cost(&self, base_cost: u32, queue_length: usize) -> u32 {
        self.iter()
            .filter_map(|effect| effect.spec.cost)
            .find_map(|hook| hook.evaluate(base_cost, queue_length))
            .unwrap_or(base_cost)
    }

    /// Net damage after every active damage hook.
    #[must_use]
    pub fn query_damage(&self, target: DamageTarget, amount: u32) -> DamageOutcome {
        let outcome = self
            .iter()
            .filter_map(|effect| effect.spec.damage)
            .fold(DamageOutcome::unchanged(amount), |outcome, hook| {
                if outcome.suppressed {
                    outcome
                } else {
                    hook.fold(target, outcome)
                }
            });

        if outcome.amount != amount || outcome.suppressed {
            debug!(
                target: "combat::effects",
                recipient = ?target,
                requested = amount,
                amount = outcome.amount,
                suppressed = outcome.suppressed,
                "damage modified"
            );
        }
        outcome
    }

    /// Phase override requested at the end of `from`.
    ///
    /// Only the end of `Resolving` can be overridden. Requests are one-shot:
    /// each effect's request is consumed here, and several requests in the
    /// same resolution still amount to a single override.
    pub fn query_phase_override(&mut self, from: Phase) -> PhaseOverride {
        if from != Phase::Resolving {
            return PhaseOverride::default();
        }

        let mut result = PhaseOverride::default();
        for kind in self.order.iter().rev() {
            let Some(effect) = self.active.get_mut(kind) else {
                continue;
            };
            match effect.spec.phase {
                Some(PhaseHook::RepeatPlayerTurn) if !effect.repeat_consumed => {
                    effect.repeat_consumed = true;
                    if result.next.is_none() {
                        result = PhaseOverride {
                            next: Some(Phase::PlayerTurn),
                            granted_by: Some(*kind),
                        };
                    }
                }
                _ => {}
            }
        }

        if let Some(kind) = result.granted_by {
            debug!(target: "combat::effects", effect = %kind, "player turn repeat requested");
        }
        result
    }

    // === Lifecycle notifications ===

    /// Evaluate transition-based expiry rules for `from → to`.
    ///
    /// Returns the kinds that expired.
    pub fn notify_phase_transition(&mut self, from: Phase, to: Phase) -> SmallVec<[EffectKind; 4]> {
        self.phase = to;

        let expiring: SmallVec<[(EffectKind, ExpiryRule); 4]> = self
            .iter()
            .filter_map(|effect| {
                effect
                    .spec
                    .expiry_on_transition(from, to)
                    .map(|rule| (effect.kind(), rule))
            })
            .collect();

        expiring
            .into_iter()
            .filter_map(|(kind, rule)| {
                self.detach(kind, RemovalReason::Expired(rule))
                    .map(|removed| removed.kind)
            })
            .collect()
    }

    /// A new action was appended; `queue_length` is the post-insertion length.
    pub fn notify_action_queued(&mut self, queue_length: usize) -> QueueOutcome {
        self.notify_queue_changed(QueueChange::Inserted { len: queue_length })
    }

    /// Evaluate queue hooks and count-based expiry for a queue change.
    ///
    /// Removals only re-evaluate; they neither charge nor count.
    pub fn notify_queue_changed(&mut self, change: QueueChange) -> QueueOutcome {
        let mut outcome = QueueOutcome::default();

        let QueueChange::Inserted { len } = change else {
            debug!(target: "combat::effects", len = change.len(), "queue shrank");
            return outcome;
        };

        let kinds: SmallVec<[EffectKind; 4]> = self.order.iter().rev().copied().collect();
        for kind in kinds {
            let Some(effect) = self.active.get_mut(&kind) else {
                continue;
            };

            if let Some(limit) = effect.spec.action_limit() {
                if effect.actions_covered >= limit {
                    self.detach(kind, RemovalReason::Expired(ExpiryRule::AfterNActionsQueued(limit)));
                    outcome.released.push(kind);
                    continue;
                }
            }

            match effect.spec.queue.map(|hook| hook.on_insert(len)) {
                Some(QueueHookResult::Release) => {
                    self.detach(kind, RemovalReason::Released);
                    outcome.released.push(kind);
                }
                Some(QueueHookResult::Charge(amount)) => {
                    effect.actions_covered += 1;
                    outcome.self_damage.push(SelfCharge { kind, amount });
                }
                None => effect.actions_covered += 1,
            }
        }

        outcome
    }

    /// Remove `kind`, recording why.
    fn detach(&mut self, kind: EffectKind, reason: RemovalReason) -> Option<RemovedEffect> {
        let effect = self.active.remove(&kind)?;
        self.order.retain(|k| *k != kind);

        let removed = RemovedEffect {
            id: effect.id,
            kind,
            reason,
        };

        info!(
            target: "combat::effects",
            effect = %kind,
            id = effect.id.raw(),
            ?reason,
            "effect removed"
        );

        self.removed.push(removed);
        Some(removed)
    }
}
