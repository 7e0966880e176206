//! Hit points, damage application, and the events they produce.

mod damage;
mod events;

pub use damage::{DamageKind, DamagePipeline, DamageReport, Vitals};
pub use events::{BattleEvent, BattleObserver, EventRecorder, ResolvedAction};
