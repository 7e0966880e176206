//! Battle events and observers.
//!
//! The presentation layer (animation, sound, HUD) subscribes to events
//! instead of being called by the rules. Observers run synchronously, in
//! registration order, right after the state change they describe.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::damage::DamageReport;
use crate::core::{Action, ActionId, Phase};
use crate::effects::{EffectId, EffectKind, RemovedEffect};

/// One action after resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedAction {
    pub action: Action,

    /// 1-based order within its resolution batch.
    pub order: usize,

    /// Effective cost at resolution time (informational).
    pub cost: u32,

    /// Damage dealt to the enemy.
    pub damage: DamageReport,
}

/// Something observers may react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleEvent {
    PhaseChanged { from: Phase, to: Phase, turn: u32 },
    ActionQueued { action: ActionId, position: usize, cost: u32 },
    ActionRemoved { action: ActionId },
    /// Reordered within the queue; positions are 1-based.
    ActionMoved { action: ActionId, from: usize, to: usize },
    ActionResolved(ResolvedAction),
    EffectApplied { id: EffectId, kind: EffectKind },
    EffectRemoved(RemovedEffect),
    Damage(DamageReport),
    /// The enemy turn was skipped and the player acts again.
    TurnRepeated { by: EffectKind },
}

/// Receives battle events.
pub trait BattleObserver {
    fn on_event(&mut self, event: &BattleEvent);
}

impl<F> BattleObserver for F
where
    F: FnMut(&BattleEvent),
{
    fn on_event(&mut self, event: &BattleEvent) {
        self(event);
    }
}

/// Observer that records every event; clones share the same log.
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<BattleEvent>>>,
}

impl EventRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<BattleEvent> {
        self.events.borrow().clone()
    }

    /// Take everything recorded so far.
    pub fn take(&self) -> Vec<BattleEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl BattleObserver for EventRecorder {
    fn on_event(&mut self, event: &BattleEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
