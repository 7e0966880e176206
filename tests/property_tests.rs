//! Property tests over random command sequences.

use proptest::prelude::*;

use scroll_combat::turn::TurnController;
use scroll_combat::{
    BattleConfig, BattleEvent, CardId, CardPlay, DamageTarget, EffectKind, EffectRegistry,
    EventRecorder, Phase, ScrollCatalog,
};

#[derive(Clone, Debug)]
enum Command {
    Apply(EffectKind),
    Remove(EffectKind),
    Queue { base_cost: u32, power: u32 },
    Unqueue(usize),
    EndTurn,
    ResolveNext,
    FinishResolution,
    Strike(u32),
    FinishEnemyTurn,
}

fn kind() -> impl Strategy<Value = EffectKind> {
    prop::sample::select(EffectKind::ALL.to_vec())
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        kind().prop_map(Command::Apply),
        kind().prop_map(Command::Remove),
        (0u32..8, 0u32..30).prop_map(|(base_cost, power)| Command::Queue { base_cost, power }),
        (0usize..6).prop_map(Command::Unqueue),
        Just(Command::EndTurn),
        Just(Command::ResolveNext),
        Just(Command::FinishResolution),
        (0u32..20).prop_map(Command::Strike),
        Just(Command::FinishEnemyTurn),
    ]
}

fn run(ctrl: &mut TurnController, command: &Command) {
    match *command {
        Command::Apply(kind) => {
            ctrl.apply_effect(kind);
        }
        Command::Remove(kind) => {
            ctrl.remove_effect(kind);
        }
        Command::Queue { base_cost, power } => {
            ctrl.queue_card(CardPlay::new(CardId::new(1), base_cost, power));
        }
        Command::Unqueue(index) => {
            ctrl.remove_queued(index);
        }
        Command::EndTurn => {
            ctrl.end_turn();
        }
        Command::ResolveNext => {
            ctrl.resolve_next();
        }
        Command::FinishResolution => {
            ctrl.finish_resolution();
        }
        Command::Strike(amount) => {
            ctrl.strike_player(amount);
        }
        Command::FinishEnemyTurn => {
            ctrl.finish_enemy_turn();
        }
    }
}

proptest! {
    /// Never more than one active effect per kind.
    #[test]
    fn prop_one_effect_per_kind(commands in prop::collection::vec(command(), 0..60)) {
        let mut ctrl = TurnController::new(BattleConfig::default()).unwrap();

        for command in &commands {
            run(&mut ctrl, command);

            let mut kinds: Vec<EffectKind> = ctrl.effects().iter().map(|e| e.kind()).collect();
            let total = kinds.len();
            kinds.sort_by_key(|k| k.as_str());
            kinds.dedup();
            prop_assert_eq!(kinds.len(), total);
        }
    }

    /// Every phase change follows a legal edge; Resolving is only entered
    /// from PlayerTurn.
    #[test]
    fn prop_phase_edges_legal(commands in prop::collection::vec(command(), 0..80)) {
        let mut ctrl = TurnController::new(BattleConfig::default()).unwrap();
        let recorder = EventRecorder::new();
        ctrl.subscribe(recorder.clone());

        for command in &commands {
            run(&mut ctrl, command);
        }

        let mut current = Phase::PlayerTurn;
        for event in recorder.events() {
            if let BattleEvent::PhaseChanged { from, to, .. } = event {
                prop_assert_eq!(from, current);
                prop_assert!(from.can_transition_to(to));
                if to == Phase::Resolving {
                    prop_assert_eq!(from, Phase::PlayerTurn);
                }
                current = to;
            }
        }
        prop_assert_eq!(current, ctrl.phase());
    }

    /// Applying and then removing any set of effects restores base answers.
    #[test]
    fn prop_remove_restores_baseline(
        kinds in prop::collection::vec(kind(), 0..10),
        base_cost in 0u32..50,
        queue_length in 0usize..10,
        amount in 0u32..1000,
    ) {
        let catalog = ScrollCatalog::default();
        let mut registry = EffectRegistry::new();

        for &kind in &kinds {
            registry.apply(catalog.spec(kind));
        }
        for &kind in &kinds {
            registry.remove(kind);
        }

        prop_assert!(registry.is_empty());
        prop_assert_eq!(registry.query_cost(base_cost, queue_length), base_cost);
        for target in [DamageTarget::Player, DamageTarget::Enemy] {
            let outcome = registry.query_damage(target, amount);
            prop_assert_eq!(outcome.amount, amount);
            prop_assert!(!outcome.suppressed);
        }
        prop_assert_eq!(registry.query_phase_override(Phase::Resolving).next, None);
    }

    /// Ward suppresses every incoming amount.
    #[test]
    fn prop_ward_suppresses_any_amount(amount in any::<u32>()) {
        let mut registry = EffectRegistry::new();
        registry.apply(ScrollCatalog::default().spec(EffectKind::UnbrokenWard));

        let outcome = registry.query_damage(DamageTarget::Player, amount);
        prop_assert_eq!(outcome.amount, 0);
        prop_assert!(outcome.suppressed);
    }

    /// Fury multiplies outgoing damage only.
    #[test]
    fn prop_fury_doubles_outgoing(amount in 0u32..1_000_000) {
        let mut registry = EffectRegistry::new();
        registry.apply(ScrollCatalog::default().spec(EffectKind::EchoingFury));

        prop_assert_eq!(registry.query_damage(DamageTarget::Enemy, amount).amount, amount * 2);
        prop_assert_eq!(registry.query_damage(DamageTarget::Player, amount).amount, amount);
    }
}
