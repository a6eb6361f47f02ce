//! Projectile hit resolution.
//!
//! Each projectile is consumed by its first qualifying hit: the player is
//! checked first (hostile fire only), then living actors in roster order.
//! Naive O(P*A); the arena never holds more than a few dozen of either.

use tracing::{debug, info};

use zenith_core::constants::{ACTOR_HIT_RADIUS, PLAYER_HIT_RADIUS};
use zenith_core::events::SimEvent;
use zenith_core::state::GameState;
use zenith_core::types::ActorId;

pub fn run(state: &mut GameState) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for p in projectiles {
        if p.owner != ActorId::Player
            && !state.player.is_dead()
            && state.player.pos.distance(p.pos) < PLAYER_HIT_RADIUS
        {
            let killed = state.player.apply_damage(p.damage);
            state.events.push(SimEvent::PlayerHit {
                shooter: p.owner,
                health: state.player.health,
            });
            if killed {
                info!(shooter = %p.owner, "operator down");
                state.is_game_over = true;
                state.events.push(SimEvent::PlayerDown { shooter: p.owner });
            }
            continue;
        }

        let target = state
            .actors
            .iter_mut()
            .find(|a| !a.is_dead() && a.id != p.owner && a.pos.distance(p.pos) < ACTOR_HIT_RADIUS);

        match target {
            Some(actor) => {
                if actor.apply_damage(p.damage) {
                    debug!(victim = %actor.id, shooter = %p.owner, "actor killed");
                    state.events.push(SimEvent::ActorKilled {
                        victim: actor.id,
                        shooter: p.owner,
                    });
                } else {
                    state.events.push(SimEvent::ActorHit {
                        victim: actor.id,
                        shooter: p.owner,
                        health: actor.health,
                    });
                }
            }
            None => survivors.push(p),
        }
    }

    state.projectiles = survivors;
}
