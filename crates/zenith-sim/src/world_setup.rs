//! Spawn factories for the arena: walls, the player, civilians and enforcers.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use zenith_core::constants::*;
use zenith_core::enums::{ActorKind, ActorState, Plan};
use zenith_core::state::{Actor, GameState, Wall};
use zenith_core::types::{ActorId, SimTime, Vec2};

/// State of a fresh session: player at the idle spawn, empty roster, no mission.
pub fn initial_state() -> GameState {
    GameState {
        time: SimTime::default(),
        mission_id: 0,
        player: spawn_player(Vec2::from(PLAYER_IDLE_SPAWN)),
        actors: Vec::new(),
        projectiles: Vec::new(),
        walls: arena_walls(),
        mission: None,
        history: Vec::new(),
        is_game_over: false,
        is_mission_active: false,
        last_dialogue: DEFAULT_DIALOGUE.to_string(),
        alarm_raised: false,
        next_projectile_id: 0,
        events: Vec::new(),
    }
}

/// The fixed six-segment arena layout.
pub fn arena_walls() -> Vec<Wall> {
    let solid = |a: (f32, f32), b: (f32, f32)| Wall {
        start: Vec2::from(a),
        end: Vec2::from(b),
        destructible: false,
        health: None,
    };
    let breakable = |a: (f32, f32), b: (f32, f32)| Wall {
        start: Vec2::from(a),
        end: Vec2::from(b),
        destructible: true,
        health: Some(DESTRUCTIBLE_WALL_HEALTH),
    };

    vec![
        solid((50.0, 50.0), (50.0, 750.0)),
        solid((750.0, 50.0), (750.0, 750.0)),
        breakable((150.0, 150.0), (350.0, 150.0)),
        breakable((450.0, 400.0), (650.0, 400.0)),
        solid((100.0, 550.0), (300.0, 550.0)),
        solid((500.0, 200.0), (500.0, 350.0)),
    ]
}

/// The operator at full health, standing still.
pub fn spawn_player(pos: Vec2) -> Actor {
    Actor {
        id: ActorId::Player,
        kind: ActorKind::Player,
        pos,
        velocity: Vec2::ZERO,
        rotation: 0.0,
        health: PLAYER_MAX_HEALTH,
        max_health: PLAYER_MAX_HEALTH,
        state: ActorState::Idle,
        plan: None,
    }
}

/// Civilians scattered over the central band, drifting slowly.
pub fn spawn_civilians(rng: &mut ChaCha8Rng, count: u32) -> Vec<Actor> {
    (0..count)
        .map(|i| {
            let pos = Vec2::new(
                rng.gen_range(CIVILIAN_SPAWN_X.0..CIVILIAN_SPAWN_X.1),
                rng.gen_range(CIVILIAN_SPAWN_Y.0..CIVILIAN_SPAWN_Y.1),
            );
            let rotation = rng.gen_range(0.0..std::f32::consts::TAU);
            let velocity = Vec2::new(
                rng.gen_range(-0.5f32..0.5) * CIVILIAN_INITIAL_DRIFT,
                rng.gen_range(-0.5f32..0.5) * CIVILIAN_INITIAL_DRIFT,
            );
            Actor {
                id: ActorId::Civilian(i),
                kind: ActorKind::Civilian,
                pos,
                velocity,
                rotation,
                health: CIVILIAN_MAX_HEALTH,
                max_health: CIVILIAN_MAX_HEALTH,
                state: ActorState::Idle,
                plan: Some(Plan::Browsing),
            }
        })
        .collect()
}

/// Enforcers along the top band, facing down into the arena, on patrol.
pub fn spawn_enforcers(rng: &mut ChaCha8Rng, count: u32) -> Vec<Actor> {
    (0..count)
        .map(|i| Actor {
            id: ActorId::Enforcer(i),
            kind: ActorKind::Enemy,
            pos: Vec2::new(
                rng.gen_range(ENFORCER_SPAWN_X.0..ENFORCER_SPAWN_X.1),
                rng.gen_range(ENFORCER_SPAWN_Y.0..ENFORCER_SPAWN_Y.1),
            ),
            velocity: Vec2::ZERO,
            rotation: std::f32::consts::FRAC_PI_2,
            health: ENFORCER_MAX_HEALTH,
            max_health: ENFORCER_MAX_HEALTH,
            state: ActorState::Patrol,
            plan: Some(Plan::Perimeter),
        })
        .collect()
}
