//! Battle configuration.
//!
//! Hosts configure a battle at startup by providing:
//! - Starting hit points for both sides
//! - The settling delay between resolution and the next phase
//! - `ScrollTuning`: the numbers behind the scroll effects
//!
//! Configuration can be built in code with the `with_*` builders or loaded
//! from JSON; missing fields take their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Numbers behind the scroll catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTuning {
    /// Outgoing damage multiplier while Echoing Fury is active.
    pub fury_multiplier: u32,

    /// Arcane Debt makes actions free while the queue holds at most this many.
    pub debt_threshold: usize,

    /// Self-damage per action queued for free under Arcane Debt.
    pub debt_self_damage: u32,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            fury_multiplier: 2,
            debt_threshold: 3,
            debt_self_damage: 10,
        }
    }
}

/// Complete battle configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Player hit points at battle start.
    pub player_hp: u32,

    /// Enemy hit points at battle start.
    pub enemy_hp: u32,

    /// Pause before entering the enemy turn or a repeated player turn.
    pub settle_delay_ms: u64,

    /// Scroll effect numbers.
    pub scrolls: ScrollTuning,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            player_hp: 100,
            enemy_hp: 100,
            settle_delay_ms: 600,
            scrolls: ScrollTuning::default(),
        }
    }
}

impl BattleConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Set player hit points.
    #[must_use]
    pub fn with_player_hp(mut self, hp: u32) -> Self {
        self.player_hp = hp;
        self
    }

    /// Set enemy hit points.
    #[must_use]
    pub fn with_enemy_hp(mut self, hp: u32) -> Self {
        self.enemy_hp = hp;
        self
    }

    /// Set the settling delay in milliseconds.
    #[must_use]
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Replace the scroll tuning.
    #[must_use]
    pub fn with_scrolls(mut self, scrolls: ScrollTuning) -> Self {
        self.scrolls = scrolls;
        self
    }

    /// Settling delay as a [`Duration`].
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Check invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_hp == 0 {
            return Err(ConfigError::InvalidValue {
                field: "player_hp",
                reason: "must be greater than zero",
            });
        }
        if self.enemy_hp == 0 {
            return Err(ConfigError::InvalidValue {
                field: "enemy_hp",
                reason: "must be greater than zero",
            });
        }
        if self.scrolls.fury_multiplier == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scrolls.fury_multiplier",
                reason: "must be at least 1",
            });
        }
        if self.scrolls.debt_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scrolls.debt_threshold",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
