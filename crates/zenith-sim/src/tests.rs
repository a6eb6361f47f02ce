//! Tests for the simulation engine, systems, and mission lifecycle.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use zenith_core::commands::{InputIntent, MoveKeys};
use zenith_core::constants::*;
use zenith_core::enums::*;
use zenith_core::events::SimEvent;
use zenith_core::mission::{EnemyConfig, MissionParams};
use zenith_core::state::{GameState, Projectile};
use zenith_core::types::{ActorId, Vec2};

use crate::engine::{step, SimConfig, SimulationEngine};
use crate::systems::{collision, movement, projectiles};
use crate::world_setup;

const FRAME: f32 = 1.0 / 60.0;

fn params(density: Option<f64>) -> MissionParams {
    MissionParams {
        location: "Rain-slicked alley".into(),
        objective: "Eliminate the sector guard".into(),
        enemy_config: EnemyConfig {
            density,
            ..Default::default()
        },
        narrative_brief: "Neon hums over wet concrete.".into(),
        ..Default::default()
    }
}

fn engine_with_mission(density: f64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    engine.start_mission(params(Some(density)));
    engine
}

fn stationary_projectile(id: u64, pos: Vec2, owner: ActorId) -> Projectile {
    Projectile {
        id,
        pos,
        velocity: Vec2::ZERO,
        owner,
        damage: PROJECTILE_DAMAGE,
    }
}

/// Park every civilian in the bottom-left corner, away from the action.
fn park_civilians(state: &mut GameState) {
    for actor in state.actors.iter_mut().filter(|a| a.is_civilian()) {
        actor.pos = Vec2::new(30.0, 770.0);
        actor.velocity = Vec2::ZERO;
    }
}

// ---- World model ----

#[test]
fn test_initial_state() {
    let engine = SimulationEngine::new(SimConfig::default());
    let state = engine.state();

    assert_eq!(state.phase(), MissionPhase::Idle);
    assert_eq!(state.player.pos, Vec2::new(400.0, 600.0));
    assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    assert!(state.actors.is_empty());
    assert!(state.projectiles.is_empty());
    assert!(state.mission.is_none());
    assert!(state.history.is_empty());
    assert_eq!(state.last_dialogue, DEFAULT_DIALOGUE);

    assert_eq!(state.walls.len(), 6);
    assert_eq!(state.walls.iter().filter(|w| w.destructible).count(), 2);
    assert!(state
        .walls
        .iter()
        .all(|w| w.destructible == w.health.is_some()));
}

#[test]
fn test_idle_engine_does_not_tick() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let before = engine.snapshot();
    let after = engine.tick(FRAME);
    assert!(Arc::ptr_eq(&before, &after), "idle engine must not publish new state");
    assert_eq!(after.time.tick, 0);
}

// ---- Mission start ----

#[test]
fn test_start_mission_spawns_roster() {
    let engine = engine_with_mission(3.0);
    let state = engine.state();

    assert_eq!(state.enforcers().count(), 3);
    assert_eq!(state.civilians().count(), CIVILIAN_COUNT as usize);
    assert_eq!(state.phase(), MissionPhase::Active);
    assert_eq!(state.mission_id, 1);
    assert_eq!(state.player.pos, Vec2::new(400.0, 700.0));

    for civ in state.civilians() {
        assert!((100.0..700.0).contains(&civ.pos.x));
        assert!((200.0..600.0).contains(&civ.pos.y));
        assert!(civ.velocity.x.abs() <= CIVILIAN_INITIAL_DRIFT);
        assert!(civ.velocity.y.abs() <= CIVILIAN_INITIAL_DRIFT);
        assert_eq!(civ.health, CIVILIAN_MAX_HEALTH);
        assert_eq!(civ.plan, Some(Plan::Browsing));
    }
    for guard in state.enforcers() {
        assert!((50.0..200.0).contains(&guard.pos.y));
        assert_eq!(guard.state, ActorState::Patrol);
        assert_eq!(guard.health, ENFORCER_MAX_HEALTH);
        assert!((guard.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    let ids: Vec<String> = state.actors.iter().map(|a| a.id.to_string()).collect();
    assert_eq!(ids[0], "civ-0");
    assert_eq!(ids[CIVILIAN_COUNT as usize], "sector-guard-0");
}

#[test]
fn test_start_mission_default_density() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.start_mission(params(None));
    assert_eq!(engine.state().enforcers().count(), DEFAULT_ENFORCER_COUNT as usize);
}

#[test]
fn test_restart_is_idempotent() {
    let mut engine = engine_with_mission(4.0);
    {
        let state = engine.state_mut();
        state.player.health = 40;
        state.history.push(zenith_core::mission::MissionOutcome {
            success: true,
            time_seconds: 12.0,
            kills: 4,
            stealth_rating: STEALTH_RATING_QUIET,
            lethality: Lethality::High,
        });
        state
            .projectiles
            .push(stationary_projectile(99, Vec2::new(5.0, 5.0), ActorId::Player));
    }
    for _ in 0..30 {
        engine.tick(FRAME);
    }

    let state = engine.start_mission(params(Some(2.0)));
    assert!(state.projectiles.is_empty());
    assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
    assert_eq!(state.time.tick, 0);
    assert_eq!(state.mission_id, 2);
    assert_eq!(state.enforcers().count(), 2);
    assert_eq!(state.history.len(), 1, "history survives restarts");
    assert!(state.is_mission_active);
    assert!(!state.is_game_over);
}

#[test]
fn test_restart_after_game_over() {
    let mut engine = engine_with_mission(3.0);
    engine.state_mut().is_game_over = true;
    assert!(!engine.is_running());

    let state = engine.start_mission(params(Some(3.0)));
    assert!(state.is_running());
    assert_eq!(state.phase(), MissionPhase::Active);
}

// ---- Victory ----

#[test]
fn test_killing_all_enforcers_completes_mission() {
    let mut engine = engine_with_mission(3.0);
    {
        let state = engine.state_mut();
        park_civilians(state);
        let spots = [
            Vec2::new(200.0, 100.0),
            Vec2::new(400.0, 100.0),
            Vec2::new(600.0, 100.0),
        ];
        let guards = state.actors.iter_mut().filter(|a| a.is_enforcer());
        for (guard, spot) in guards.zip(spots) {
            guard.pos = spot;
            guard.health = PROJECTILE_DAMAGE;
        }
        for (i, spot) in spots.into_iter().enumerate() {
            state
                .projectiles
                .push(stationary_projectile(1000 + i as u64, spot, ActorId::Player));
        }
    }

    // Zero elapsed time keeps everything in place for the collision pass.
    let state = engine.tick(0.0);

    assert_eq!(state.live_enforcer_count(), 0);
    assert!(!state.is_mission_active);
    assert_eq!(state.phase(), MissionPhase::Victory);
    assert_eq!(state.history.len(), 1);

    let outcome = &state.history[0];
    assert!(outcome.success);
    assert_eq!(outcome.kills, 3);
    assert_eq!(outcome.lethality, Lethality::High);
    assert_eq!(
        outcome.stealth_rating, STEALTH_RATING_ALARMED,
        "gunfire put the guards into combat"
    );
    assert!((outcome.time_seconds - 1.0 / 60.0).abs() < 1e-9);
    assert!(state
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::MissionComplete { .. })));

    // Loop goes dormant: no second record.
    let after = engine.tick(FRAME);
    assert_eq!(after.history.len(), 1);
    assert_eq!(after.time.tick, state.time.tick);
}

#[test]
fn test_quiet_victory_rates_stealthy() {
    let mut state = world_setup::initial_state();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    state = crate::mission::start_mission(&state, params(Some(1.0)), &mut rng);
    for guard in state.actors.iter_mut().filter(|a| a.is_enforcer()) {
        guard.apply_damage(ENFORCER_MAX_HEALTH);
    }

    let outcome = crate::mission::check_completion(&mut state).unwrap();
    assert_eq!(outcome.stealth_rating, STEALTH_RATING_QUIET);
    assert_eq!(outcome.kills, 1);
    assert!(crate::mission::check_completion(&mut state).is_none());
}

// ---- Defeat ----

#[test]
fn test_player_death_ends_loop() {
    let mut engine = engine_with_mission(3.0);
    {
        let state = engine.state_mut();
        state.player.health = PROJECTILE_DAMAGE;
        let at = state.player.pos;
        state
            .projectiles
            .push(stationary_projectile(7, at, ActorId::Enforcer(0)));
    }

    let state = engine.tick(0.0);
    assert!(state.is_game_over);
    assert_eq!(state.player.health, 0);
    assert_eq!(state.phase(), MissionPhase::GameOver);
    assert!(state.history.is_empty(), "defeat writes no history");
    assert!(state
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::PlayerDown { shooter: ActorId::Enforcer(0) })));

    let frozen = engine.tick(FRAME);
    assert!(Arc::ptr_eq(&state, &frozen), "state stops changing after defeat");
    assert!(!engine.is_running());
}

#[test]
fn test_player_immune_to_own_fire() {
    let mut engine = engine_with_mission(3.0);
    {
        let state = engine.state_mut();
        let at = state.player.pos;
        state
            .projectiles
            .push(stationary_projectile(7, at, ActorId::Player));
    }
    let state = engine.tick(0.0);
    assert_eq!(state.player.health, PLAYER_MAX_HEALTH);
}

// ---- Collision ----

#[test]
fn test_projectile_hits_at_most_one_target() {
    let mut state = world_setup::initial_state();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    state = crate::mission::start_mission(&state, params(Some(1.0)), &mut rng);
    park_civilians(&mut state);

    let spot = Vec2::new(300.0, 300.0);
    state.actors[0].pos = spot;
    state.actors[1].pos = spot + Vec2::new(2.0, 0.0);
    state
        .projectiles
        .push(stationary_projectile(1, spot, ActorId::Player));

    collision::run(&mut state);

    let damaged = state
        .actors
        .iter()
        .filter(|a| a.health < a.max_health)
        .count();
    assert_eq!(damaged, 1);
    assert_eq!(state.actors[0].health, CIVILIAN_MAX_HEALTH - PROJECTILE_DAMAGE);
    assert!(state.projectiles.is_empty());
}

#[test]
fn test_projectile_skips_owner_and_corpses() {
    let mut state = world_setup::initial_state();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    state = crate::mission::start_mission(&state, params(Some(2.0)), &mut rng);
    park_civilians(&mut state);

    let shooter = ActorId::Enforcer(0);
    let spot = Vec2::new(300.0, 120.0);
    let roster = state.actors.len();
    state.actors[roster - 2].pos = spot;
    state.actors[roster - 1].pos = spot;
    state.actors[roster - 1].apply_damage(ENFORCER_MAX_HEALTH);

    state
        .projectiles
        .push(stationary_projectile(1, spot, shooter));
    collision::run(&mut state);

    assert_eq!(state.projectiles.len(), 1, "no eligible target in range");
    assert_eq!(state.actors[roster - 2].health, ENFORCER_MAX_HEALTH);
}

#[test]
fn test_kill_transitions_once() {
    let mut state = world_setup::initial_state();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    state = crate::mission::start_mission(&state, params(Some(1.0)), &mut rng);
    park_civilians(&mut state);

    let idx = state.actors.len() - 1;
    let spot = Vec2::new(600.0, 100.0);
    state.actors[idx].pos = spot;
    state.actors[idx].velocity = Vec2::new(50.0, 0.0);

    let mut deaths = 0;
    for i in 0..10 {
        state
            .projectiles
            .push(stationary_projectile(i, spot, ActorId::Player));
        collision::run(&mut state);
        deaths += state
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::ActorKilled { .. }))
            .count();
        state.events.clear();
    }

    let guard = &state.actors[idx];
    assert_eq!(deaths, 1);
    assert_eq!(guard.state, ActorState::Dead);
    assert_eq!(guard.health, 0);
    assert_eq!(guard.velocity, Vec2::ZERO);
    assert_eq!(guard.plan, Some(Plan::Deceased));
    assert_eq!(state.actors.len(), idx + 1, "corpses stay in the roster");
}

// ---- Containment ----

#[test]
fn test_player_clamped_to_arena_interior() {
    let mut engine = engine_with_mission(3.0);
    engine.set_input(InputIntent {
        moves: MoveKeys {
            down: true,
            left: true,
            ..Default::default()
        },
        ..Default::default()
    });

    for _ in 0..200 {
        let state = engine.tick(0.1);
        if !state.is_running() {
            break;
        }
        let p = state.player.pos;
        assert!((20.0..=780.0).contains(&p.x), "x escaped: {}", p.x);
        assert!((20.0..=780.0).contains(&p.y), "y escaped: {}", p.y);
    }
}

#[test]
fn test_projectiles_culled_on_exit() {
    let mut state = world_setup::initial_state();
    state.projectiles.push(Projectile {
        id: 1,
        pos: Vec2::new(795.0, 400.0),
        velocity: Vec2::new(PLAYER_PROJECTILE_SPEED, 0.0),
        owner: ActorId::Player,
        damage: PROJECTILE_DAMAGE,
    });
    state.projectiles.push(Projectile {
        id: 2,
        pos: Vec2::new(400.0, 400.0),
        velocity: Vec2::new(PLAYER_PROJECTILE_SPEED, 0.0),
        owner: ActorId::Player,
        damage: PROJECTILE_DAMAGE,
    });

    projectiles::run(&mut state, FRAME);
    let ids: Vec<u64> = state.projectiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_actor_soft_bounce() {
    let mut state = world_setup::initial_state();
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    state = crate::mission::start_mission(&state, params(Some(1.0)), &mut rng);

    state.actors[0].pos = Vec2::new(799.0, 400.0);
    state.actors[0].velocity = Vec2::new(160.0, 0.0);
    state.actors[1].pos = Vec2::new(400.0, 1.0);
    state.actors[1].velocity = Vec2::new(0.0, -160.0);

    movement::run_actors(&mut state, FRAME);
    assert!(state.actors[0].velocity.x < 0.0);
    assert!(state.actors[1].velocity.y > 0.0);

    // Still outside next tick: the velocity keeps pointing inward.
    movement::run_actors(&mut state, FRAME);
    assert!(state.actors[0].velocity.x < 0.0);
    assert!(state.actors[1].velocity.y > 0.0);
}

// ---- AI integration ----

#[test]
fn test_gunfire_panics_all_civilians_within_one_tick() {
    let mut engine = engine_with_mission(3.0);
    engine
        .state_mut()
        .projectiles
        .push(stationary_projectile(1, Vec2::new(5.0, 5.0), ActorId::Player));

    let state = engine.tick(FRAME);
    for civ in state.civilians().filter(|c| !c.is_dead()) {
        assert_eq!(civ.state, ActorState::Alert, "{} did not panic", civ.id);
        assert!(
            (civ.velocity.length() - CIVILIAN_PANIC_SPEED).abs() < 1e-2,
            "{} flees at {}",
            civ.id,
            civ.velocity.length()
        );
    }
    for guard in state.enforcers() {
        assert_eq!(guard.state, ActorState::Combat);
    }
    assert!(state.alarm_raised);
    assert!(state
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::CiviliansPanicked { count } if *count == CIVILIAN_COUNT)));
}

#[test]
fn test_player_fire_cadence() {
    let mut engine = engine_with_mission(3.0);
    engine.set_input(InputIntent {
        aim: Vec2::new(400.0, 0.0),
        fire: true,
        ..Default::default()
    });

    let mut player_shots = 0;
    for _ in 0..60 {
        let state = engine.tick(FRAME);
        player_shots += state
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::ShotFired { owner: ActorId::Player, .. }))
            .count();
    }
    assert_eq!(player_shots, 6, "one shot every 10 ticks");
    assert!(engine.state().player.rotation < 0.0, "facing up toward the aim point");
}

#[test]
fn test_muzzle_offset() {
    let mut state = world_setup::initial_state();
    projectiles::fire(&mut state, ActorId::Player, Vec2::new(100.0, 100.0), 0.0, 700.0);
    let p = &state.projectiles[0];
    assert_eq!(p.pos, Vec2::new(100.0 + MUZZLE_OFFSET, 100.0));
    assert_eq!(p.velocity, Vec2::new(700.0, 0.0));
    assert_eq!(p.damage, PROJECTILE_DAMAGE);
    assert_eq!(state.next_projectile_id, 1);
}

// ---- Properties over a long run ----

#[test]
fn test_health_never_increases() {
    let mut engine = engine_with_mission(8.0);
    engine.set_input(InputIntent {
        aim: Vec2::new(400.0, 100.0),
        fire: true,
        ..Default::default()
    });

    let mut prev = engine.snapshot();
    for _ in 0..900 {
        let next = engine.tick(FRAME);
        assert!(next.player.health <= prev.player.health);
        for (a, b) in prev.actors.iter().zip(next.actors.iter()) {
            assert_eq!(a.id, b.id, "roster order is stable");
            assert!(b.health <= a.health, "{} healed", b.id);
            assert!((0..=b.max_health).contains(&b.health));
            assert_eq!(b.is_dead(), b.health == 0);
            if a.is_dead() {
                assert!(b.is_dead(), "{} rose from the dead", b.id);
            }
        }
        assert_eq!(next.walls, prev.walls, "walls never change");
        if !next.is_running() {
            break;
        }
        prev = next;
    }
}

#[test]
fn test_snapshots_are_immutable() {
    let mut engine = engine_with_mission(3.0);
    let old = engine.snapshot();
    engine.tick(FRAME);
    engine.update_dialogue("Contact.");
    assert_eq!(old.time.tick, 0);
    assert_eq!(old.last_dialogue, DEFAULT_DIALOGUE);
    assert_eq!(engine.state().last_dialogue, "Contact.");
}

#[test]
fn test_step_is_pure() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let start = crate::mission::start_mission(
        &world_setup::initial_state(),
        params(Some(3.0)),
        &mut rng,
    );
    let copy = start.clone();
    let next = step(&start, &InputIntent::default(), FRAME, &mut rng);
    assert_eq!(start, copy, "previous state must not be touched");
    assert_eq!(next.time.tick, 1);
}

#[test]
fn test_large_dt_clamped() {
    let mut engine = engine_with_mission(3.0);
    engine.set_input(InputIntent {
        moves: MoveKeys {
            up: true,
            ..Default::default()
        },
        ..Default::default()
    });
    let before = engine.state().player.pos;
    let state = engine.tick(5.0);
    let moved = before.y - state.player.pos.y;
    assert!(
        (moved - PLAYER_SPEED * MAX_FRAME_DT).abs() < 1e-3,
        "moved {moved}, expected one clamped frame"
    );

    let state = engine.tick(f32::NAN);
    assert!(state.player.pos.is_finite());
}

#[test]
fn test_same_seed_same_run() {
    let run = || {
        let mut engine = engine_with_mission(5.0);
        engine.set_input(InputIntent {
            aim: Vec2::new(300.0, 100.0),
            fire: true,
            ..Default::default()
        });
        for _ in 0..300 {
            engine.tick(FRAME);
        }
        serde_json::to_string(engine.state().as_ref()).unwrap()
    };
    assert_eq!(run(), run());
}
