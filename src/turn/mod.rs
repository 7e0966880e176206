//! Turn flow: the phase state machine, snapshots, enemy AI, and async pacing.

mod controller;
mod driver;
mod enemy;
mod view;

pub use controller::{QueuedCard, TurnController};
pub use driver::{BattleDriver, BattleHost, NoAnimation};
pub use enemy::{EnemyAi, EnemyIntent, PassiveEnemy, RollingEnemy};
pub use view::{BattleView, EffectView, QueuedView};
