//! Queued player actions.
//!
//! An action is a card the player has committed to this turn. It carries
//! its printed cost and the damage it deals when it resolves. Actions are
//! owned by the [`ActionQueue`](crate::queue::ActionQueue) until they are
//! drained for resolution or removed.
//!
//! ```
//! use scroll_combat::core::{Action, ActionId, CardId};
//!
//! let slash = Action::new(ActionId::new(1), CardId::new(7), 3).with_power(6);
//! assert_eq!(slash.base_cost, 3);
//! assert_eq!(slash.power, 6);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a queued action within one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub u32);

impl ActionId {
    /// Create a new action ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Action({})", self.0)
    }
}

/// Identifier of the card definition an action was created from.
///
/// The engine never interprets it; the host maps it back to art and text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card waiting in the queue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Unique per battle.
    pub id: ActionId,

    /// Card this action was queued from.
    pub card: CardId,

    /// Printed cost before effects.
    pub base_cost: u32,

    /// Damage dealt to the enemy on resolution, before effects.
    pub power: u32,
}

impl Action {
    /// Create an action with no damage.
    #[must_use]
    pub fn new(id: ActionId, card: CardId, base_cost: u32) -> Self {
        Self {
            id,
            card,
            base_cost,
            power: 0,
        }
    }

    /// Set outgoing damage (builder pattern).
    #[must_use]
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }
}

/// A card the host wants to queue; the controller assigns the [`ActionId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlay {
    pub card: CardId,
    pub base_cost: u32,
    pub power: u32,
}

impl CardPlay {
    /// Create a card play.
    #[must_use]
    pub const fn new(card: CardId, base_cost: u32, power: u32) -> Self {
        Self {
            card,
            base_cost,
            power,
        }
    }

    /// Bind this play to an ID.
    #[must_use]
    pub fn into_action(self, id: ActionId) -> Action {
        Action::new(id, self.card, self.base_cost).with_power(self.power)
    }
}
