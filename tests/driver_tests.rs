//! Async driver integration tests.
//!
//! Run on a paused tokio clock so the settling delay is observable without
//! actually sleeping.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use scroll_combat::turn::{BattleDriver, BattleHost, EnemyAi, EnemyIntent, NoAnimation, TurnController};
use scroll_combat::{
    BattleConfig, BattleError, BattleView, CardId, CardPlay, CombatRng, EffectKind, Phase,
    ResolvedAction, Result, RollingEnemy,
};

/// Records what was animated and when.
#[derive(Default)]
struct RecordingHost {
    animated: Vec<(u32, Duration)>,
    start: Option<Instant>,
    step: Duration,
}

#[async_trait(?Send)]
impl BattleHost for RecordingHost {
    async fn animate_action(&mut self, resolved: &ResolvedAction) -> Result<()> {
        let start = *self.start.get_or_insert_with(Instant::now);
        tokio::time::sleep(self.step).await;
        self.animated.push((resolved.damage.dealt, start.elapsed()));
        Ok(())
    }
}

/// Strikes a fixed script and counts its turns.
struct ScriptedEnemy {
    strikes: Vec<u32>,
    turns: usize,
}

#[async_trait(?Send)]
impl EnemyAi for ScriptedEnemy {
    async fn plan_turn(&mut self, _view: &BattleView) -> Result<Vec<EnemyIntent>> {
        self.turns += 1;
        Ok(self.strikes.iter().copied().map(EnemyIntent::Strike).collect())
    }
}

/// Fails the animation of the first `failures` actions.
struct FailingHost {
    failures: usize,
    attempts: usize,
}

#[async_trait(?Send)]
impl BattleHost for FailingHost {
    async fn animate_action(&mut self, _resolved: &ResolvedAction) -> Result<()> {
        self.attempts += 1;
        if self.attempts <= self.failures {
            return Err(BattleError::Host("animation dropped".into()));
        }
        Ok(())
    }
}

struct BrokenEnemy;

#[async_trait(?Send)]
impl EnemyAi for BrokenEnemy {
    async fn plan_turn(&mut self, _view: &BattleView) -> Result<Vec<EnemyIntent>> {
        Err(BattleError::EnemyAi("no plan".into()))
    }
}

/// Route engine logs to the test output; filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn card(power: u32) -> CardPlay {
    CardPlay::new(CardId::new(3), 1, power)
}

fn controller(settle_ms: u64) -> TurnController {
    TurnController::new(BattleConfig::default().with_settle_delay_ms(settle_ms)).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_animations_run_in_order() {
    init_tracing();
    let host = RecordingHost {
        step: Duration::from_millis(100),
        ..RecordingHost::default()
    };
    let enemy = ScriptedEnemy { strikes: vec![], turns: 0 };
    let mut driver = BattleDriver::new(controller(0), host, enemy);

    for power in [3, 5, 8] {
        driver.controller_mut().queue_card(card(power));
    }
    driver.end_turn().await.unwrap();

    let (_, host, _) = driver.into_inner();
    let dealt: Vec<u32> = host.animated.iter().map(|(d, _)| *d).collect();
    assert_eq!(dealt, vec![3, 5, 8]);
    assert_eq!(host.animated[2].1, Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn test_settle_delay_before_enemy_turn() {
    init_tracing();
    let enemy = ScriptedEnemy { strikes: vec![4], turns: 0 };
    let mut driver = BattleDriver::new(controller(600), NoAnimation, enemy);

    let start = Instant::now();
    assert_eq!(driver.end_turn().await.unwrap(), Phase::PlayerTurn);
    assert!(start.elapsed() >= Duration::from_millis(600));
    assert_eq!(driver.controller().player().hp, 96);
}

#[tokio::test(start_paused = true)]
async fn test_temporal_grace_skips_enemy_plan() {
    let enemy = ScriptedEnemy { strikes: vec![10], turns: 0 };
    let mut driver = BattleDriver::new(controller(0), NoAnimation, enemy);
    driver.controller_mut().apply_effect(EffectKind::TemporalGrace);

    driver.end_turn().await.unwrap();
    driver.end_turn().await.unwrap();

    let (ctrl, _, enemy) = driver.into_inner();
    assert_eq!(enemy.turns, 1);
    assert_eq!(ctrl.turn(), 3);
    assert_eq!(ctrl.player().hp, 90);
}

#[tokio::test(start_paused = true)]
async fn test_ward_holds_through_enemy_turn() {
    let enemy = ScriptedEnemy { strikes: vec![7, 7, 7], turns: 0 };
    let mut driver = BattleDriver::new(controller(0), NoAnimation, enemy);
    driver.controller_mut().apply_effect(EffectKind::UnbrokenWard);

    driver.end_turn().await.unwrap();
    assert_eq!(driver.controller().player().hp, 100);
    assert!(!driver.controller().effects().contains(EffectKind::UnbrokenWard));

    driver.end_turn().await.unwrap();
    assert_eq!(driver.controller().player().hp, 79);
}

#[tokio::test(start_paused = true)]
async fn test_enemy_failure_leaves_enemy_turn() {
    let mut driver = BattleDriver::new(controller(0), NoAnimation, BrokenEnemy);

    let err = driver.end_turn().await.unwrap_err();
    assert!(matches!(err, BattleError::EnemyAi(_)));
    assert_eq!(driver.controller().phase(), Phase::EnemyTurn);
}

#[tokio::test(start_paused = true)]
async fn test_host_failure_does_not_stall_resolution() {
    let host = FailingHost { failures: 1, attempts: 0 };
    let enemy = ScriptedEnemy { strikes: vec![5], turns: 0 };
    let mut driver = BattleDriver::new(controller(0), host, enemy);
    for power in [5, 6, 7] {
        driver.controller_mut().queue_card(card(power));
    }

    let err = driver.end_turn().await.unwrap_err();
    assert!(matches!(err, BattleError::Host(_)));

    let ctrl = driver.controller();
    assert_eq!(ctrl.pending_resolution(), 0);
    assert_eq!(ctrl.enemy().hp, 82);
    assert_eq!(ctrl.phase(), Phase::PlayerTurn);
    assert_eq!(ctrl.player().hp, 95);

    driver.controller_mut().queue_card(card(2));
    assert_eq!(driver.end_turn().await.unwrap(), Phase::PlayerTurn);
    assert_eq!(driver.controller().enemy().hp, 80);

    let (_, host, enemy) = driver.into_inner();
    assert_eq!(host.attempts, 4);
    assert_eq!(enemy.turns, 2);
}

#[tokio::test(start_paused = true)]
async fn test_rolling_enemy_battle_is_reproducible() {
    async fn play(seed: u64) -> u32 {
        let enemy = RollingEnemy::new(CombatRng::new(seed).for_context("goblin"), 2, 9)
            .with_strikes(2)
            .with_wait_weight(30);
        let mut driver = BattleDriver::new(controller(0), NoAnimation, enemy);
        for _ in 0..5 {
            driver.controller_mut().queue_card(card(4));
            driver.end_turn().await.unwrap();
        }
        driver.controller().player().hp
    }

    assert_eq!(play(11).await, play(11).await);
}
