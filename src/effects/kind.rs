//! Effect kinds and application IDs.
//!
//! The set of kinds is closed: adding a status effect means adding a
//! variant here and a spec in [`scrolls`](super::scrolls). Outside input
//! (inventory item ids) is parsed once via [`FromStr`] and rejected there,
//! so the registry never sees a kind it cannot evaluate.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::EffectError;

/// The closed set of status effect types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectKind {
    /// Outgoing player damage is multiplied until the queue resolves.
    EchoingFury,
    /// Enemy damage to the player is suppressed until the next player turn.
    UnbrokenWard,
    /// The next resolution returns to the player instead of the enemy.
    TemporalGrace,
    /// Early queued actions are free but cost hit points.
    ArcaneDebt,
}

impl EffectKind {
    /// Every kind, in catalog order.
    pub const ALL: [EffectKind; 4] = [
        EffectKind::EchoingFury,
        EffectKind::UnbrokenWard,
        EffectKind::TemporalGrace,
        EffectKind::ArcaneDebt,
    ];

    /// Snake-case identifier, matching inventory item ids.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EffectKind::EchoingFury => "echoing_fury",
            EffectKind::UnbrokenWard => "unbroken_ward",
            EffectKind::TemporalGrace => "temporal_grace",
            EffectKind::ArcaneDebt => "arcane_debt",
        }
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectKind {
    type Err = EffectError;

    /// Accepts `echoing_fury` as well as the item form `scroll_of_echoing_fury`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let key = key.strip_prefix("scroll_of_").unwrap_or(&key);

        EffectKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == key)
            .ok_or_else(|| EffectError::UnknownKind(s.to_string()))
    }
}

/// Unique identifier for one application of an effect.
///
/// Re-applying a kind yields a fresh ID even though it replaces the old one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl EffectId {
    /// Create a new effect ID.
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

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}
