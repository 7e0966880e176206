//! Status effects and the hooks they declare.
//!
//! Effects influence the engine's extension points (cost, damage, phase,
//! queue) by declaring hooks as data in an [`EffectSpec`]. The
//! [`EffectRegistry`] folds those declarations whenever the engine asks.
//!
//! ## Key Components
//!
//! - [`EffectKind`]: The closed set of effect types
//! - [`EffectSpec`] / [`ExpiryRule`]: What an effect does and when it ends
//! - [`hooks`]: Hook declarations and outcome types
//! - [`scrolls`]: The four scroll definitions
//! - [`EffectRegistry`]: Active effects and hook folding
//!
//! ## Example Usage
//!
//! ```
//! use scroll_combat::core::Phase;
//! use scroll_combat::effects::{DamageTarget, EffectKind, EffectRegistry, ScrollCatalog};
//!
//! let catalog = ScrollCatalog::default();
//! let mut registry = EffectRegistry::new();
//!
//! registry.apply(catalog.spec(EffectKind::EchoingFury));
//! assert_eq!(registry.query_damage(DamageTarget::Enemy, 10).amount, 20);
//!
//! // Fury lasts until the queued actions have resolved.
//! registry.notify_phase_transition(Phase::Resolving, Phase::EnemyTurn);
//! assert_eq!(registry.query_damage(DamageTarget::Enemy, 10).amount, 10);
//! ```

pub mod hooks;
mod kind;
mod registry;
pub mod scrolls;
mod spec;

pub use hooks::{
    CostHook, DamageHook, DamageOutcome, DamageTarget, PhaseHook, PhaseOverride, QueueChange,
    QueueHook, QueueOutcome, SelfCharge,
};
pub use kind::{EffectId, EffectKind};
pub use registry::{ActiveEffect, EffectRegistry, RemovalReason, RemovedEffect};
pub use scrolls::ScrollCatalog;
pub use spec::{EffectSpec, ExpiryRule};
