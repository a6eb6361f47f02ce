//! Actor AI system: evaluates the FSM for every living non-player actor.
//!
//! Perception is coarse: actors see the player's position and whether any
//! projectile exists at all this tick.

use rand_chacha::ChaCha8Rng;
use tracing::debug;

use zenith_core::enums::ActorState;
use zenith_core::events::SimEvent;
use zenith_core::state::GameState;

use zenith_actor_ai::fsm::{evaluate, ActorContext};
use zenith_actor_ai::profiles::enforcer_profile;

use crate::systems::projectiles;

pub fn run(state: &mut GameState, rng: &mut ChaCha8Rng) {
    let player_position = state.player.pos;
    let gunfire_detected = !state.projectiles.is_empty();
    let tick = state.time.tick;
    let projectile_speed = enforcer_profile().projectile_speed;

    let mut shots = Vec::new();
    let mut panicked = 0u32;

    for actor in state.actors.iter_mut().filter(|a| !a.is_dead()) {
        let ctx = ActorContext {
            kind: actor.kind,
            state: actor.state,
            position: actor.pos,
            velocity: actor.velocity,
            rotation: actor.rotation,
            plan: actor.plan,
            player_position,
            gunfire_detected,
            tick,
        };

        let update = evaluate(&ctx, rng);
        actor.velocity = update.new_velocity;
        actor.rotation = update.new_rotation;
        actor.plan = update.new_plan;
        actor.state = update.new_state;

        if update.state_changed {
            match update.new_state {
                ActorState::Combat => {
                    debug!(actor = %actor.id, "enforcer engaged");
                    state.events.push(SimEvent::EnforcerEngaged { id: actor.id });
                    state.alarm_raised = true;
                }
                ActorState::Alert => panicked += 1,
                _ => {}
            }
        }

        if update.fire {
            shots.push((actor.id, actor.pos, actor.rotation));
        }
    }

    if panicked > 0 {
        state.events.push(SimEvent::CiviliansPanicked { count: panicked });
    }

    for (owner, pos, rotation) in shots {
        projectiles::fire(state, owner, pos, rotation, projectile_speed);
    }
}
