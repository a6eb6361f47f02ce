//! Translates input intent into player velocity, facing and trigger pulls.

use zenith_core::commands::InputIntent;
use zenith_core::constants::{PLAYER_FIRE_INTERVAL_TICKS, PLAYER_PROJECTILE_SPEED};
use zenith_core::state::GameState;
use zenith_core::types::bearing_to;

use crate::systems::projectiles;

pub fn run(state: &mut GameState, input: &InputIntent) {
    if state.player.is_dead() {
        return;
    }

    state.player.velocity = input.moves.velocity();
    state.player.rotation = bearing_to(state.player.pos, input.aim);

    if input.fire && state.time.tick % PLAYER_FIRE_INTERVAL_TICKS == 0 {
        let (id, pos, rotation) = (state.player.id, state.player.pos, state.player.rotation);
        projectiles::fire(state, id, pos, rotation, PLAYER_PROJECTILE_SPEED);
    }
}
