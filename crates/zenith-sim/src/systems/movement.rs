//! Kinematic integration for the player and the actor roster.
//!
//! Updates positions from velocities: position += velocity * dt.

use zenith_core::constants::{ARENA_SIZE, PLAYER_BOUNDS_MARGIN};
use zenith_core::state::GameState;
use zenith_core::types::Vec2;

/// Integrate the player, then clamp to the arena interior.
pub fn run_player(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    player.pos += player.velocity * dt;
    player.pos = player.pos.clamp(
        Vec2::splat(PLAYER_BOUNDS_MARGIN),
        Vec2::splat(ARENA_SIZE - PLAYER_BOUNDS_MARGIN),
    );
}

/// Integrate living actors. Leaving the arena on an axis turns that
/// velocity component back inward; walls are not consulted.
pub fn run_actors(state: &mut GameState, dt: f32) {
    for actor in state.actors.iter_mut().filter(|a| !a.is_dead()) {
        actor.pos += actor.velocity * dt;

        if actor.pos.x < 0.0 {
            actor.velocity.x = actor.velocity.x.abs();
        } else if actor.pos.x > ARENA_SIZE {
            actor.velocity.x = -actor.velocity.x.abs();
        }
        if actor.pos.y < 0.0 {
            actor.velocity.y = actor.velocity.y.abs();
        } else if actor.pos.y > ARENA_SIZE {
            actor.velocity.y = -actor.velocity.y.abs();
        }
    }
}
