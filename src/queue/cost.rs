//! Effective action costs.

use crate::core::Action;
use crate::effects::EffectRegistry;

use super::action_queue::ActionQueue;

/// Read-only view computing live costs.
///
/// Costs are re-derived from the current queue length every time, so a
/// queue reorder or removal is reflected on the next render.
#[derive(Clone, Copy, Debug)]
pub struct CostResolver<'a> {
    effects: &'a EffectRegistry,
    queue_length: usize,
}

impl<'a> CostResolver<'a> {
    /// Resolver over the registry and the queue's current length.
    #[must_use]
    pub fn new(effects: &'a EffectRegistry, queue: &ActionQueue) -> Self {
        Self::with_length(effects, queue.len())
    }

    /// Resolver for an explicit queue length.
    #[must_use]
    pub fn with_length(effects: &'a EffectRegistry, queue_length: usize) -> Self {
        Self {
            effects,
            queue_length,
        }
    }

    /// Effective cost of `action`.
    #[must_use]
    pub fn cost_of(&self, action: &Action) -> u32 {
        self.effects.query_cost(action.base_cost, self.queue_length)
    }

    /// Sum of effective costs.
    #[must_use]
    pub fn total<'b>(&self, actions: impl IntoIterator<Item = &'b Action>) -> u32 {
        actions
            .into_iter()
            .fold(0u32, |acc, action| acc.saturating_add(self.cost_of(action)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActionId, CardId};
    use crate::effects::scrolls;

    #[test]
    fn test_cost_without_effects() {
        let effects = EffectRegistry::new();
        let queue = ActionQueue::new();
        let action = Action::new(ActionId::new(1), CardId::new(1), 4);

        assert_eq!(CostResolver::new(&effects, &queue).cost_of(&action), 4);
    }

    #[test]
    fn test_cost_follows_queue_length() {
        let mut effects = EffectRegistry::new();
        effects.apply(scrolls::arcane_debt(3, 10));
        let action = Action::new(ActionId::new(1), CardId::new(1), 4);

        assert_eq!(CostResolver::with_length(&effects, 3).cost_of(&action), 0);
        assert_eq!(CostResolver::with_length(&effects, 4).cost_of(&action), 4);
    }

    #[test]
    fn test_total() {
        let effects = EffectRegistry::new();
        let actions = [
            Action::new(ActionId::new(1), CardId::new(1), 2),
            Action::new(ActionId::new(2), CardId::new(2), 5),
        ];

        assert_eq!(CostResolver::with_length(&effects, 2).total(&actions), 7);
    }
}
