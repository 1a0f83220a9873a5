//! Core domain: unit tests for the arena and the tick orchestrator.

use bevy::prelude::*;

use super::{
    Arena, CombatEvent, CombatSimulation, FightSetup, InputIntents, SetupError, TerminalState,
    build_fight,
};
use crate::combat::AttackStage;
use crate::content::{
    ArenaDef, BossVariantDef, CombatDefaults, ContentRegistry, DEFAULT_BOSS_ID, LoadedDefaults,
};
use crate::player::StatAllocation;

const DT: f32 = 1.0 / 60.0;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn warden_fight(seed: u64) -> CombatSimulation {
    CombatSimulation::new(
        BossVariantDef::warden(),
        &CombatDefaults::default(),
        StatAllocation::default(),
        seed,
    )
}

/// Deterministic scripted input: slow circling with periodic attacks, so the
/// boss catches up and the fight actually happens.
fn scripted_intents(tick: u32) -> InputIntents {
    let t = tick as f32 * DT;
    InputIntents {
        move_x: 0.3 * t.cos(),
        move_y: 0.3 * t.sin(),
        primary_action: tick % 40 < 5,
        secondary_action: tick % 150 > 130,
        ability_key_pressed: tick % 90 == 0,
        dodge_pressed: tick % 120 == 60,
        cursor_x: 400.0,
        cursor_y: 150.0,
    }
}

// ============================================================================
// Arena
// ============================================================================

#[test]
fn test_circle_arena_clamp_and_contains() {
    let arena = Arena::Circle {
        center: Vec2::new(400.0, 300.0),
        radius: 250.0,
    };
    assert!(arena.contains(Vec2::new(400.0, 300.0), 15.0));
    assert!(arena.contains(Vec2::new(635.0, 300.0), 15.0));
    assert!(!arena.contains(Vec2::new(640.0, 300.0), 15.0));

    let clamped = arena.clamp(Vec2::new(900.0, 300.0), 15.0);
    assert!(approx(clamped.x, 635.0));
    assert!(approx(clamped.y, 300.0));

    // Inside points are untouched
    let inside = Vec2::new(450.0, 320.0);
    assert_eq!(arena.clamp(inside, 15.0), inside);

    assert!(arena.within_margin(Vec2::new(740.0, 300.0), 100.0));
    assert!(!arena.within_margin(Vec2::new(760.0, 300.0), 100.0));
}

#[test]
fn test_rect_arena_clamps_per_axis() {
    let arena = Arena::Rect {
        min: Vec2::new(100.0, 75.0),
        max: Vec2::new(700.0, 525.0),
    };
    assert_eq!(arena.center(), Vec2::new(400.0, 300.0));

    let clamped = arena.clamp(Vec2::new(-50.0, 300.0), 20.0);
    assert_eq!(clamped, Vec2::new(120.0, 300.0));

    let corner = arena.clamp(Vec2::new(800.0, 600.0), 20.0);
    assert_eq!(corner, Vec2::new(680.0, 505.0));
    assert!(arena.contains(corner, 20.0));
}

#[test]
fn test_rect_arena_narrower_than_body() {
    let arena = Arena::Rect {
        min: Vec2::new(0.0, 0.0),
        max: Vec2::new(20.0, 200.0),
    };
    let clamped = arena.clamp(Vec2::new(50.0, 100.0), 15.0);
    assert_eq!(clamped, Vec2::new(10.0, 100.0));
}

#[test]
fn test_arena_from_definition() {
    let def = ArenaDef::Circle {
        center: (400.0, 300.0),
        radius: 250.0,
    };
    assert_eq!(
        Arena::from(&def),
        Arena::Circle {
            center: Vec2::new(400.0, 300.0),
            radius: 250.0,
        }
    );
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn test_new_fight_starting_positions() {
    let sim = warden_fight(1);
    assert_eq!(sim.player().position, Vec2::new(400.0, 300.0));
    assert_eq!(sim.boss().position, Vec2::new(400.0, 150.0));
    assert_eq!(sim.boss().phase, 1);
    assert_eq!(sim.terminal(), None);
    assert_eq!(sim.elapsed(), 0.0);
}

#[test]
fn test_new_fight_clamps_stats() {
    let sim = CombatSimulation::new(
        BossVariantDef::warden(),
        &CombatDefaults::default(),
        StatAllocation::new(1, 1, 40, 1, 1),
        1,
    );
    assert_eq!(sim.player().stats.vitality, 20);
    assert_eq!(sim.player().health.max, 300.0);
}

#[test]
fn test_unknown_boss_is_rejected() {
    let registry = ContentRegistry::builtin();
    let result = CombatSimulation::from_registry(
        &registry,
        "boss_missing",
        &CombatDefaults::default(),
        StatAllocation::default(),
        1,
    );
    assert!(matches!(result, Err(SetupError::UnknownBoss(id)) if id == "boss_missing"));
}

#[test]
fn test_invalid_boss_is_rejected() {
    let mut broken = BossVariantDef::warden();
    broken.phases[1].pattern_ids.push(99);
    let mut registry = ContentRegistry::default();
    registry.insert(broken);

    let result = CombatSimulation::from_registry(
        &registry,
        DEFAULT_BOSS_ID,
        &CombatDefaults::default(),
        StatAllocation::default(),
        1,
    );
    let Err(SetupError::InvalidContent(errors)) = result else {
        panic!("expected a content error");
    };
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_build_fight_falls_back_to_reference_boss() {
    let setup = FightSetup {
        boss_id: "boss_missing".to_string(),
        stats: StatAllocation::default(),
        seed: 5,
    };
    let sim = build_fight(
        &ContentRegistry::builtin(),
        &LoadedDefaults::default(),
        &setup,
    );
    assert_eq!(sim.boss().variant.id, DEFAULT_BOSS_ID);
    assert_eq!(sim.context().seed(), 5);
}

#[test]
fn test_colossus_fight_from_registry() {
    let sim = CombatSimulation::from_registry(
        &ContentRegistry::builtin(),
        "boss_colossus",
        &CombatDefaults::default(),
        StatAllocation::default(),
        1,
    )
    .unwrap();
    assert!(matches!(sim.context().arena, Arena::Rect { .. }));
    assert_eq!(sim.boss().health.max, 800.0);
}

// ============================================================================
// Tick
// ============================================================================

#[test]
fn test_invalid_dt_is_ignored() {
    let mut sim = warden_fight(1);
    let intents = InputIntents::moving(1.0, 0.0);

    sim.tick(f32::NAN, &intents);
    sim.tick(-1.0, &intents);
    sim.tick(f32::INFINITY, &intents);

    assert_eq!(sim.elapsed(), 0.0);
    assert_eq!(sim.player().position, Vec2::new(400.0, 300.0));
}

#[test]
fn test_defeat_wins_over_victory() {
    let mut sim = warden_fight(1);
    sim.player_mut().health.set(0.0);
    sim.boss_mut().health.set(0.0);

    assert_eq!(
        sim.tick(DT, &InputIntents::default()),
        Some(TerminalState::Defeat)
    );
}

#[test]
fn test_victory_when_boss_dies() {
    let mut sim = warden_fight(1);
    sim.boss_mut().health.set(0.0);
    assert_eq!(
        sim.tick(DT, &InputIntents::default()),
        Some(TerminalState::Victory)
    );
    assert!(
        sim.drain_events()
            .contains(&CombatEvent::FightEnded(TerminalState::Victory))
    );
}

#[test]
fn test_terminal_state_is_final() {
    let mut sim = warden_fight(1);
    sim.player_mut().health.set(0.0);
    sim.tick(DT, &InputIntents::default());
    let elapsed = sim.elapsed();
    sim.drain_events();

    for _ in 0..10 {
        assert_eq!(
            sim.tick(DT, &InputIntents::moving(1.0, 0.0)),
            Some(TerminalState::Defeat)
        );
    }
    assert_eq!(sim.elapsed(), elapsed);
    assert!(sim.drain_events().is_empty());
    assert_eq!(sim.terminal(), Some(TerminalState::Defeat));
}

#[test]
fn test_stagger_opens_at_end_of_tick_and_amplifies() {
    let mut sim = warden_fight(1);
    sim.boss_mut().position = Vec2::new(400.0, 240.0);
    sim.context_mut().stun.set_value(99.0);
    let attack = InputIntents {
        primary_action: true,
        ..Default::default()
    };

    sim.tick(0.1, &attack);
    assert!(approx(sim.boss().health.current, 465.0));
    assert!(sim.context().stun.is_active());
    assert!(sim.drain_events().contains(&CombatEvent::StaggerStarted));

    // Melee cooldown is 0.45 s; the sixth tick lands the amplified hit
    for _ in 0..5 {
        sim.tick(0.1, &attack);
    }
    assert!(approx(sim.boss().health.current, 465.0 - 35.0 * 1.35));
}

#[test]
fn test_drain_events_empties_the_log() {
    let mut sim = warden_fight(1);
    sim.tick(
        DT,
        &InputIntents {
            dodge_pressed: true,
            ..InputIntents::moving(1.0, 0.0)
        },
    );
    assert_eq!(sim.drain_events(), vec![CombatEvent::RollStarted]);
    assert!(sim.drain_events().is_empty());
}

#[test]
fn test_player_stays_inside_while_walking_into_wall() {
    let mut sim = warden_fight(3);
    let intents = InputIntents::moving(0.0, 1.0);
    for _ in 0..600 {
        sim.tick(DT, &intents);
        let player = sim.player();
        assert!(
            sim.context()
                .arena
                .contains(player.position, player.radius - 1e-3)
        );
    }
}

#[test]
fn test_same_seed_same_fight() {
    let mut a = warden_fight(42);
    let mut b = warden_fight(42);
    let mut events_a = Vec::new();
    let mut events_b = Vec::new();

    for tick in 0..1200 {
        let intents = scripted_intents(tick);
        let end_a = a.tick(DT, &intents);
        let end_b = b.tick(DT, &intents);
        assert_eq!(end_a, end_b);
        events_a.extend(a.drain_events());
        events_b.extend(b.drain_events());
    }

    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(events_a, events_b);
    assert!(
        events_a
            .iter()
            .any(|e| matches!(e, CombatEvent::AttackStarted { .. }))
    );
}

#[test]
fn test_health_stays_in_bounds_over_a_fight() {
    let mut sim = warden_fight(9);
    for tick in 0..3000 {
        sim.tick(DT, &scripted_intents(tick));
        let player = &sim.player().health;
        let boss = &sim.boss().health;
        assert!(player.current >= 0.0 && player.current <= player.max);
        assert!(boss.current >= 0.0 && boss.current <= boss.max);
        if sim.terminal().is_some() {
            break;
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

#[test]
fn test_snapshot_serializes_to_json() {
    let sim = warden_fight(3);
    let snapshot = sim.snapshot();
    assert_eq!(snapshot.boss.stage, AttackStage::Idle);
    assert_eq!(snapshot.boss.health_fraction, 1.0);
    assert!(snapshot.boss.hazards.is_empty());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["seed"], 3);
    assert_eq!(json["boss"]["phase"], 1);
    assert_eq!(json["boss"]["stage"], "Idle");
    assert_eq!(json["player"]["health_fraction"], 1.0);
    assert!(json["terminal"].is_null());
}

#[test]
fn test_fight_setup_defaults() {
    let mut setup = FightSetup::default();
    assert_eq!(setup.boss_id, DEFAULT_BOSS_ID);
    assert_eq!(setup.stats, StatAllocation::default());
    let seed = setup.reseed();
    assert_eq!(setup.seed, seed);
}
