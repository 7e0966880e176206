//! Core engine types: phases, actions, configuration, errors, RNG.
//!
//! These are the value types every other module builds on. None of them
//! know about effects or turn rules.

pub mod action;
pub mod config;
pub mod error;
pub mod phase;
pub mod rng;

pub use action::{Action, ActionId, CardId, CardPlay};
pub use config::{BattleConfig, ScrollTuning};
pub use error::{BattleError, ConfigError, EffectError, Result};
pub use phase::Phase;
pub use rng::CombatRng;
