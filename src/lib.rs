//! # scroll-combat
//!
//! Turn-based combat rules where consumable scrolls bend the rules for a
//! while: cards cost nothing, damage is doubled, incoming hits are blocked,
//! or the enemy's turn is skipped.
//!
//! ## Design Principles
//!
//! 1. **Effects Are Data**: A scroll produces an `EffectSpec` that lists the
//!    hooks it contributes and when it expires. Nothing replaces or wraps
//!    engine behaviour at runtime.
//!
//! 2. **Ask, Then Apply**: At every hook point (cost lookup, damage,
//!    phase choice, queue change) the engine asks the `EffectRegistry` for
//!    the net outcome and applies it itself.
//!
//! 3. **Removal Restores Baseline**: Removing an effect returns every query
//!    to exactly what it would answer had the effect never been applied.
//!
//! ## Architecture
//!
//! - **Synchronous Rules**: `TurnController` never waits. Invalid calls for
//!   the current phase are ignored.
//!
//! - **Async Pacing**: `BattleDriver` awaits host animations, sleeps for the
//!   settling delay, and asks an `EnemyAi` for the enemy's turn.
//!
//! - **Persistent Data Structures**: the queue and history use `im-rs` so
//!   snapshots for the presentation layer are O(1).
//!
//! ## Modules
//!
//! - `core`: Phases, actions, configuration, errors, RNG
//! - `effects`: Effect kinds, specs, hooks, the registry, the scroll catalog
//! - `queue`: The action queue and effective cost lookup
//! - `combat`: Hit points, the damage pipeline, battle events
//! - `turn`: The phase state machine, snapshots, enemy AI, async driver

pub mod combat;
pub mod core;
pub mod effects;
pub mod queue;
pub mod turn;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionId, BattleConfig, BattleError, CardId, CardPlay, CombatRng, ConfigError,
    EffectError, Phase, Result, ScrollTuning,
};

pub use crate::effects::{
    DamageTarget, EffectId, EffectKind, EffectRegistry, EffectSpec, ExpiryRule, RemovalReason,
    RemovedEffect, ScrollCatalog,
};

pub use crate::queue::{ActionQueue, CostResolver};

pub use crate::combat::{
    BattleEvent, BattleObserver, DamageKind, DamagePipeline, DamageReport, EventRecorder,
    ResolvedAction, Vitals,
};

pub use crate::turn::{
    BattleDriver, BattleHost, BattleView, EnemyAi, EnemyIntent, NoAnimation, PassiveEnemy,
    QueuedCard, RollingEnemy, TurnController,
};
