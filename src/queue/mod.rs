//! Pending player actions and their costs.
//!
//! - [`ActionQueue`]: Ordered actions awaiting resolution
//! - [`CostResolver`]: Live effective cost of an action
//!
//! ## Example Usage
//!
//! ```
//! use scroll_combat::core::{Action, ActionId, CardId};
//! use scroll_combat::effects::{EffectKind, EffectRegistry, ScrollCatalog};
//! use scroll_combat::queue::{ActionQueue, CostResolver};
//!
//! let mut effects = EffectRegistry::new();
//! effects.apply(ScrollCatalog::default().spec(EffectKind::ArcaneDebt));
//!
//! let mut queue = ActionQueue::new();
//! let strike = Action::new(ActionId::new(1), CardId::new(3), 3);
//! let queued = queue.enqueue(strike.clone(), &mut effects);
//!
//! assert_eq!(queued.position, 1);
//! assert_eq!(queued.outcome.total_self_damage(), 10);
//! assert_eq!(CostResolver::new(&effects, &queue).cost_of(&strike), 0);
//! ```

mod action_queue;
mod cost;

pub use action_queue::{ActionQueue, Enqueued};
pub use cost::CostResolver;
