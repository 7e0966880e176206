//! Turn state machine.
//!
//! ```text
//!             end_turn()                finish_resolution()
//! PlayerTurn ───────────▶ Resolving ──────────────────────────▶ EnemyTurn
//!     ▲                      │  resolve_next() × n                  │
//!     │                      │                                      │
//!     │   repeat requested   │        finish_enemy_turn()           │
//!     ◀──────────────────────┘◀─────────────────────────────────────┘
//! ```
//!
//! The controller owns the effect registry, the action queue, and the
//! damage pipeline. At each hook point it asks the registry for the net
//! outcome and applies it itself. Calls that do not fit the current phase
//! are ignored, never errors.

use std::collections::VecDeque;

use im::Vector;
use tracing::{debug, info};

use super::view::{BattleView, EffectView, QueuedView};
use crate::combat::{BattleEvent, BattleObserver, DamagePipeline, DamageReport, ResolvedAction, Vitals};
use crate::core::{Action, ActionId, BattleConfig, CardPlay, ConfigError, EffectError, Phase};
use crate::effects::{EffectId, EffectKind, EffectRegistry, EffectSpec, ScrollCatalog};
use crate::queue::{ActionQueue, CostResolver};

/// Result of queueing a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedCard {
    pub action: Action,
    /// 1-based.
    pub position: usize,
    /// Effective cost right after insertion; the host charges this.
    pub cost: u32,
    /// Self-damage the insertion cost the player.
    pub self_damage: u32,
}

/// Drives one battle through its phases.
pub struct TurnController {
    config: BattleConfig,
    catalog: ScrollCatalog,

    phase: Phase,
    /// Player turn counter, starting at 1.
    turn: u32,

    effects: EffectRegistry,
    queue: ActionQueue,
    damage: DamagePipeline,

    /// Actions drained for the current resolution, front resolves next.
    resolving: VecDeque<Action>,
    /// Queue length when the current batch was drained.
    batch_len: usize,

    history: Vector<ResolvedAction>,
    observers: Vec<Box<dyn BattleObserver>>,
    next_action_id: u32,
}

impl std::fmt::Debug for TurnController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("effects", &self.effects.len())
            .field("queued", &self.queue.len())
            .field("resolving", &self.resolving.len())
            .finish_non_exhaustive()
    }
}

impl TurnController {
    /// Start a battle in `PlayerTurn`, turn 1.
    pub fn new(config: BattleConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            catalog: ScrollCatalog::new(config.scrolls.clone()),
            damage: DamagePipeline::new(config.player_hp, config.enemy_hp),
            config,
            phase: Phase::PlayerTurn,
            turn: 1,
            effects: EffectRegistry::new(),
            queue: ActionQueue::new(),
            resolving: VecDeque::new(),
            batch_len: 0,
            history: Vector::new(),
            observers: Vec::new(),
            next_action_id: 0,
        })
    }

    /// Register an observer; it sees every event from now on.
    pub fn subscribe(&mut self, observer: impl BattleObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    #[must_use]
    pub fn queue(&self) -> &ActionQueue {
        &self.queue
    }

    #[must_use]
    pub fn player(&self) -> Vitals {
        self.damage.player()
    }

    #[must_use]
    pub fn enemy(&self) -> Vitals {
        self.damage.enemy()
    }

    /// Actions still waiting in the current resolution batch.
    #[must_use]
    pub fn pending_resolution(&self) -> usize {
        self.resolving.len()
    }

    /// Every resolved action, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ResolvedAction> {
        &self.history
    }

    // === Effects ===

    /// Apply the catalog spec for `kind`.
    pub fn apply_effect(&mut self, kind: EffectKind) -> EffectId {
        let spec = self.catalog.spec(kind);
        self.apply_spec(spec)
    }

    /// Apply a custom spec.
    pub fn apply_spec(&mut self, spec: EffectSpec) -> EffectId {
        let kind = spec.kind;
        let id = self.effects.apply(spec);
        self.flush_removals();
        self.emit(BattleEvent::EffectApplied { id, kind });
        id
    }

    /// Apply the effect named by an inventory item id.
    ///
    /// Unknown ids are rejected before anything changes; the caller keeps
    /// the item in that case.
    pub fn apply_scroll(&mut self, item_id: &str) -> Result<EffectId, EffectError> {
        let kind: EffectKind = item_id.parse()?;
        Ok(self.apply_effect(kind))
    }

    /// Remove the effect of `kind`; a no-op if absent.
    pub fn remove_effect(&mut self, kind: EffectKind) -> bool {
        let removed = self.effects.remove(kind);
        self.flush_removals();
        removed
    }

    // === Queue ===

    /// Queue a card. Only allowed during `PlayerTurn`.
    pub fn queue_card(&mut self, play: CardPlay) -> Option<QueuedCard> {
        if self.phase != Phase::PlayerTurn {
            debug!(target: "combat::turn", phase = %self.phase, "queue_card ignored");
            return None;
        }

        self.next_action_id += 1;
        let action = play.into_action(ActionId::new(self.next_action_id));
        let enqueued = self.queue.enqueue(action.clone(), &mut self.effects);
        let cost = self.cost_of(&action);

        self.emit(BattleEvent::ActionQueued {
            action: action.id,
            position: enqueued.position,
            cost,
        });

        let mut self_damage = 0u32;
        for charge in &enqueued.outcome.self_damage {
            let report = self.damage.apply_self_inflicted(charge.amount);
            self_damage = self_damage.saturating_add(report.dealt);
            self.emit(BattleEvent::Damage(report));
        }
        self.flush_removals();

        Some(QueuedCard {
            action,
            position: enqueued.position,
            cost,
            self_damage,
        })
    }

    /// Remove the queued action at 0-based `index`. Only during `PlayerTurn`.
    pub fn remove_queued(&mut self, index: usize) -> Option<Action> {
        if self.phase != Phase::PlayerTurn {
            debug!(target: "combat::turn", phase = %self.phase, "remove_queued ignored");
            return None;
        }

        let action = self.queue.remove_at(index, &mut self.effects)?;
        self.emit(BattleEvent::ActionRemoved { action: action.id });
        self.flush_removals();
        Some(action)
    }

    /// Move a queued action between 0-based indices. Only during `PlayerTurn`.
    pub fn move_queued(&mut self, from: usize, to: usize) -> bool {
        if self.phase != Phase::PlayerTurn {
            debug!(target: "combat::turn", phase = %self.phase, "move_queued ignored");
            return false;
        }

        let Some(action) = self.queue.get(from).map(|a| a.id) else {
            return false;
        };
        if !self.queue.move_action(from, to) {
            return false;
        }

        self.emit(BattleEvent::ActionMoved {
            action,
            from: from + 1,
            to: to + 1,
        });
        true
    }

    /// Live effective cost of `action`.
    #[must_use]
    pub fn cost_of(&self, action: &Action) -> u32 {
        self.cost_resolver().cost_of(action)
    }

    /// Cost resolver over the current state.
    #[must_use]
    pub fn cost_resolver(&self) -> CostResolver<'_> {
        CostResolver::new(&self.effects, &self.queue)
    }

    // === Transitions ===

    /// Leave `PlayerTurn` and start resolving the queue.
    ///
    /// Returns `false` (and does nothing) outside `PlayerTurn`.
    pub fn end_turn(&mut self) -> bool {
        if self.phase != Phase::PlayerTurn {
            debug!(target: "combat::turn", phase = %self.phase, "end_turn ignored");
            return false;
        }

        self.resolving = self.queue.drain_for_resolution().into();
        self.batch_len = self.resolving.len();
        self.enter(Phase::Resolving);
        true
    }

    /// Resolve the next action of the current batch.
    ///
    /// Returns `None` outside `Resolving` or once the batch is exhausted.
    pub fn resolve_next(&mut self) -> Option<ResolvedAction> {
        if self.phase != Phase::Resolving {
            return None;
        }
        let action = self.resolving.pop_front()?;

        let order = self.batch_len - self.resolving.len();
        let cost = CostResolver::with_length(&self.effects, self.batch_len).cost_of(&action);
        let damage = self.damage.apply_from_player(&self.effects, action.power);

        let resolved = ResolvedAction {
            action,
            order,
            cost,
            damage,
        };

        debug!(
            target: "combat::turn",
            action = resolved.action.id.raw(),
            order,
            dealt = damage.dealt,
            "action resolved"
        );

        self.history.push_back(resolved.clone());
        self.emit(BattleEvent::Damage(damage));
        self.emit(BattleEvent::ActionResolved(resolved.clone()));
        Some(resolved)
    }

    /// Close resolution once the batch is empty and pick the next phase.
    ///
    /// The next phase is `PlayerTurn` if an effect requested a repeat,
    /// `EnemyTurn` otherwise. Returns `None` if not in `Resolving` or if
    /// actions remain.
    pub fn finish_resolution(&mut self) -> Option<Phase> {
        if self.phase != Phase::Resolving || !self.resolving.is_empty() {
            debug!(
                target: "combat::turn",
                phase = %self.phase,
                pending = self.resolving.len(),
                "finish_resolution ignored"
            );
            return None;
        }

        let request = self.effects.query_phase_override(Phase::Resolving);
        let next = request.next.unwrap_or(Phase::EnemyTurn);

        if let Some(kind) = request.granted_by {
            info!(target: "combat::turn", effect = %kind, "enemy turn skipped");
            self.emit(BattleEvent::TurnRepeated { by: kind });
        }

        self.batch_len = 0;
        self.enter(next);
        Some(next)
    }

    /// Enemy damage to the player, routed through the damage hooks.
    pub fn strike_player(&mut self, amount: u32) -> DamageReport {
        let report = self.damage.apply_to_player(&self.effects, amount);
        self.emit(BattleEvent::Damage(report));
        report
    }

    /// End the enemy turn and start the next player turn.
    ///
    /// Returns `false` (and does nothing) outside `EnemyTurn`.
    pub fn finish_enemy_turn(&mut self) -> bool {
        if self.phase != Phase::EnemyTurn {
            debug!(target: "combat::turn", phase = %self.phase, "finish_enemy_turn ignored");
            return false;
        }

        self.enter(Phase::PlayerTurn);
        true
    }

    /// Snapshot for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> BattleView {
        let resolver = self.cost_resolver();

        BattleView {
            phase: self.phase,
            turn: self.turn,
            player: self.damage.player(),
            enemy: self.damage.enemy(),
            queued: self
                .queue
                .iter()
                .enumerate()
                .map(|(i, action)| QueuedView {
                    action: action.clone(),
                    position: i + 1,
                    cost: resolver.cost_of(action),
                })
                .collect(),
            effects: self
                .effects
                .iter()
                .map(|effect| EffectView {
                    id: effect.id,
                    kind: effect.kind(),
                    applied_at: effect.applied_at,
                })
                .collect(),
            pending_resolution: self.resolving.len(),
            resolved: self.history.clone(),
        }
    }

    // === Internals ===

    fn enter(&mut self, to: Phase) {
        let from = self.phase;
        debug_assert!(from.can_transition_to(to), "illegal transition {from} -> {to}");

        self.phase = to;
        if to == Phase::PlayerTurn {
            self.turn += 1;
        }
        self.effects.notify_phase_transition(from, to);

        info!(target: "combat::turn", %from, %to, turn = self.turn, "phase changed");

        self.emit(BattleEvent::PhaseChanged {
            from,
            to,
            turn: self.turn,
        });
        self.flush_removals();
    }

    fn flush_removals(&mut self) {
        for removed in self.effects.drain_removed() {
            self.emit(BattleEvent::EffectRemoved(removed));
        }
    }

    fn emit(&mut self, event: BattleEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}
