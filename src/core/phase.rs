//! Turn phases.
//!
//! A battle cycles `PlayerTurn → Resolving → EnemyTurn → PlayerTurn …`.
//! Temporal effects may shortcut `Resolving → PlayerTurn`. There is no
//! terminal phase; ending the battle is the host's decision.

use serde::{Deserialize, Serialize};

/// One state of the turn state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// The player queues cards and uses scrolls.
    #[default]
    PlayerTurn,
    /// Queued actions resolve one by one.
    Resolving,
    /// The enemy acts.
    EnemyTurn,
}

impl Phase {
    /// Short lowercase label used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::PlayerTurn => "player_turn",
            Phase::Resolving => "resolving",
            Phase::EnemyTurn => "enemy_turn",
        }
    }

    /// Whether `self → next` is an edge of the state machine.
    ///
    /// `Resolving` can only be entered from `PlayerTurn`.
    #[must_use]
    pub const fn can_transition_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::PlayerTurn, Phase::Resolving)
                | (Phase::Resolving, Phase::EnemyTurn)
                | (Phase::Resolving, Phase::PlayerTurn)
                | (Phase::EnemyTurn, Phase::PlayerTurn)
        )
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
