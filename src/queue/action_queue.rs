//! Ordered queue of pending player actions.
//!
//! Every change to the queue is reported to the effect registry after it
//! happens, so cost and queue hooks observe the post-change length.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Action, ActionId};
use crate::effects::{EffectRegistry, QueueChange, QueueOutcome};

/// Result of appending an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enqueued {
    /// 1-based position of the new action.
    pub position: usize,

    /// What the queue hooks asked for (self-damage, released effects).
    pub outcome: QueueOutcome,
}

/// FIFO queue of actions awaiting resolution.
///
/// Backed by a persistent vector so snapshots for the UI are O(1).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionQueue {
    actions: Vector<Action>,
}

impl ActionQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action and notify the registry with the new length.
    pub fn enqueue(&mut self, action: Action, effects: &mut EffectRegistry) -> Enqueued {
        let id = action.id;
        self.actions.push_back(action);
        let position = self.actions.len();

        let outcome = effects.notify_action_queued(position);

        debug!(
            target: "combat::queue",
            action = id.raw(),
            position,
            self_damage = outcome.total_self_damage(),
            "action queued"
        );

        Enqueued { position, outcome }
    }

    /// Remove the action at 0-based `index` and notify the registry.
    ///
    /// Returns `None` (and notifies nothing) if `index` is out of range.
    pub fn remove_at(&mut self, index: usize, effects: &mut EffectRegistry) -> Option<Action> {
        if index >= self.actions.len() {
            return None;
        }

        let action = self.actions.remove(index);
        effects.notify_queue_changed(QueueChange::Removed {
            len: self.actions.len(),
        });

        debug!(target: "combat::queue", action = action.id.raw(), index, "action removed");
        Some(action)
    }

    /// Move an action from one 0-based index to another.
    ///
    /// The length is unchanged, so no hook is notified. Returns `false` if
    /// either index is out of range.
    pub fn move_action(&mut self, from: usize, to: usize) -> bool {
        let len = self.actions.len();
        if from >= len || to >= len {
            return false;
        }
        if from != to {
            let action = self.actions.remove(from);
            self.actions.insert(to, action);
        }
        true
    }

    /// Empty the queue, yielding actions in FIFO order.
    ///
    /// A second call yields nothing.
    pub fn drain_for_resolution(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions).into_iter().collect()
    }

    /// Number of queued actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Action at 0-based `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    /// 1-based position of the action with `id`.
    #[must_use]
    pub fn position_of(&self, id: ActionId) -> Option<usize> {
        self.actions.iter().position(|a| a.id == id).map(|i| i + 1)
    }

    /// Iterate queued actions in order.
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// Cheap copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Action> {
        self.actions.clone()
    }
}
