//! The scroll catalog.
//!
//! | Kind | Cost | Damage | Phase | Queue | Expiry |
//! |---|---|---|---|---|---|
//! | Echoing Fury | | ×multiplier outgoing | | | queue resolved |
//! | Unbroken Ward | | suppress incoming | | | next player turn |
//! | Temporal Grace | | | repeat player turn once | | queue resolved |
//! | Arcane Debt | free while queue ≤ threshold | | | self-damage per free action | queue resolved, or after threshold actions |

use serde::{Deserialize, Serialize};

use super::hooks::{CostHook, DamageHook, PhaseHook, QueueHook};
use super::kind::EffectKind;
use super::spec::{EffectSpec, ExpiryRule};
use crate::core::ScrollTuning;

/// Outgoing damage multiplied until the queue resolves.
#[must_use]
pub fn echoing_fury(multiplier: u32) -> EffectSpec {
    EffectSpec::new(EffectKind::EchoingFury)
        .with_damage(DamageHook::MultiplyOutgoing(multiplier))
        .expires(ExpiryRule::OnQueueResolved)
}

/// Enemy damage suppressed until the next player turn begins.
#[must_use]
pub fn unbroken_ward() -> EffectSpec {
    EffectSpec::new(EffectKind::UnbrokenWard)
        .with_damage(DamageHook::SuppressIncoming)
        .expires(ExpiryRule::OnNextPlayerTurnStart)
}

/// The next resolution hands the turn back to the player.
#[must_use]
pub fn temporal_grace() -> EffectSpec {
    EffectSpec::new(EffectKind::TemporalGrace)
        .with_phase(PhaseHook::RepeatPlayerTurn)
        .expires(ExpiryRule::OnQueueResolved)
}

/// The first `threshold` queued actions are free and cost `self_damage` HP each.
#[must_use]
pub fn arcane_debt(threshold: usize, self_damage: u32) -> EffectSpec {
    let limit = u32::try_from(threshold).unwrap_or(u32::MAX);
    EffectSpec::new(EffectKind::ArcaneDebt)
        .with_cost(CostHook::FreeWhileQueueAtMost(threshold))
        .with_queue(QueueHook::SelfDamageWhileQueueAtMost {
            threshold,
            amount: self_damage,
        })
        .expires(ExpiryRule::OnQueueResolved)
        .expires(ExpiryRule::AfterNActionsQueued(limit))
}

/// Builds specs for every kind from one tuning.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollCatalog {
    tuning: ScrollTuning,
}

impl ScrollCatalog {
    /// Create a catalog from tuning numbers.
    #[must_use]
    pub fn new(tuning: ScrollTuning) -> Self {
        Self { tuning }
    }

    /// The spec for `kind`.
    #[must_use]
    pub fn spec(&self, kind: EffectKind) -> EffectSpec {
        match kind {
            EffectKind::EchoingFury => echoing_fury(self.tuning.fury_multiplier),
            EffectKind::UnbrokenWard => unbroken_ward(),
            EffectKind::TemporalGrace => temporal_grace(),
            EffectKind::ArcaneDebt => {
                arcane_debt(self.tuning.debt_threshold, self.tuning.debt_self_damage)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_kind() {
        let catalog = ScrollCatalog::default();
        for kind in EffectKind::ALL {
            let spec = catalog.spec(kind);
            assert_eq!(spec.kind, kind);
            assert!(!spec.expiry.is_empty(), "{kind} must expire on its own");
        }
    }

    #[test]
    fn test_default_numbers() {
        let catalog = ScrollCatalog::default();

        let fury = catalog.spec(EffectKind::EchoingFury);
        assert_eq!(fury.damage, Some(DamageHook::MultiplyOutgoing(2)));

        let debt = catalog.spec(EffectKind::ArcaneDebt);
        assert_eq!(debt.cost, Some(CostHook::FreeWhileQueueAtMost(3)));
        assert_eq!(
            debt.queue,
            Some(QueueHook::SelfDamageWhileQueueAtMost {
                threshold: 3,
                amount: 10
            })
        );
        assert_eq!(debt.action_limit(), Some(3));
    }

    #[test]
    fn test_hooks_are_disjoint_per_scroll() {
        let ward = unbroken_ward();
        assert!(ward.cost.is_none() && ward.phase.is_none() && ward.queue.is_none());

        let grace = temporal_grace();
        assert!(grace.cost.is_none() && grace.damage.is_none() && grace.queue.is_none());
        assert_eq!(grace.phase, Some(PhaseHook::RepeatPlayerTurn));
    }

    #[test]
    fn test_custom_tuning() {
        let catalog = ScrollCatalog::new(ScrollTuning {
            fury_multiplier: 3,
            debt_threshold: 2,
            debt_self_damage: 4,
        });

        assert_eq!(
            catalog.spec(EffectKind::EchoingFury).damage,
            Some(DamageHook::MultiplyOutgoing(3))
        );
        assert_eq!(catalog.spec(EffectKind::ArcaneDebt).action_limit(), Some(2));
    }
}
