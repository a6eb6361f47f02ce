//! Projectile spawning, flight and out-of-bounds cleanup.

use tracing::trace;

use zenith_core::constants::{ARENA_SIZE, MUZZLE_OFFSET, PROJECTILE_DAMAGE};
use zenith_core::events::SimEvent;
use zenith_core::state::{GameState, Projectile};
use zenith_core::types::{heading_vector, strictly_inside, ActorId, Vec2};

/// Spawn a projectile just ahead of the shooter, travelling along `rotation`.
pub fn fire(state: &mut GameState, owner: ActorId, pos: Vec2, rotation: f32, speed: f32) {
    let id = state.next_projectile_id;
    state.next_projectile_id = state.next_projectile_id.wrapping_add(1);

    state.projectiles.push(Projectile {
        id,
        pos: pos + heading_vector(rotation, MUZZLE_OFFSET),
        velocity: heading_vector(rotation, speed),
        owner,
        damage: PROJECTILE_DAMAGE,
    });
    state.events.push(SimEvent::ShotFired {
        owner,
        projectile_id: id,
    });
    trace!(%owner, projectile_id = id, "shot fired");
}

/// Move projectiles and discard any that left the arena.
pub fn run(state: &mut GameState, dt: f32) {
    for p in state.projectiles.iter_mut() {
        p.pos += p.velocity * dt;
    }
    state
        .projectiles
        .retain(|p| strictly_inside(p.pos, ARENA_SIZE));
}
