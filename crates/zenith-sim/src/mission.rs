//! Mission lifecycle: starting a mission and detecting victory.
//!
//! Idle -> Active -> Victory | GameOver, and back to Active on the next start.
//! Defeat is latched by collision resolution; only victory writes history.

use rand_chacha::ChaCha8Rng;
use tracing::info;

use zenith_core::constants::*;
use zenith_core::enums::Lethality;
use zenith_core::events::SimEvent;
use zenith_core::mission::{MissionOutcome, MissionParams};
use zenith_core::state::GameState;
use zenith_core::types::{SimTime, Vec2};

use crate::world_setup;

/// Build the state for a freshly started mission.
///
/// Re-seeds the roster, resets the player and the projectile list, and keeps
/// walls, history and the last dialogue line. Valid from any phase.
pub fn start_mission(prev: &GameState, params: MissionParams, rng: &mut ChaCha8Rng) -> GameState {
    let enforcer_count = params.enemy_config.enforcer_count();

    let mut actors = world_setup::spawn_civilians(rng, CIVILIAN_COUNT);
    actors.extend(world_setup::spawn_enforcers(rng, enforcer_count));

    let mut next = prev.clone();
    next.mission_id += 1;
    next.time = SimTime::default();
    next.player = world_setup::spawn_player(Vec2::from(PLAYER_MISSION_SPAWN));
    next.actors = actors;
    next.projectiles.clear();
    next.is_mission_active = true;
    next.is_game_over = false;
    next.alarm_raised = false;
    next.events.clear();

    info!(
        mission_id = next.mission_id,
        location = %params.location,
        enforcers = enforcer_count,
        civilians = CIVILIAN_COUNT,
        "mission started"
    );
    next.mission = Some(params);
    next
}

/// Close the mission if every enforcer is down. Returns the appended outcome.
pub fn check_completion(state: &mut GameState) -> Option<MissionOutcome> {
    if state.mission.is_none() || !state.is_mission_active {
        return None;
    }
    if state.live_enforcer_count() > 0 {
        return None;
    }

    let outcome = MissionOutcome {
        success: true,
        time_seconds: state.time.nominal_secs(),
        kills: state.dead_enforcer_count() as u32,
        stealth_rating: if state.alarm_raised {
            STEALTH_RATING_ALARMED
        } else {
            STEALTH_RATING_QUIET
        },
        lethality: Lethality::High,
    };

    info!(
        mission_id = state.mission_id,
        kills = outcome.kills,
        time_secs = outcome.time_seconds,
        stealth = outcome.stealth_rating,
        "mission complete"
    );

    state.history.push(outcome.clone());
    state.is_mission_active = false;
    state.events.push(SimEvent::MissionComplete {
        outcome: outcome.clone(),
    });
    Some(outcome)
}
