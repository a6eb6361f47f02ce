//! Actor behaviour finite state machine.
//!
//! Pure functions that compute state transitions, velocity, facing and fire
//! intent for one non-player actor from its own data, the player's position
//! and the global gunfire signal. No world access; randomness is injected.

use rand::Rng;

use zenith_core::enums::{ActorKind, ActorState, Plan};
use zenith_core::types::{bearing_to, heading_vector, Vec2};

use crate::profiles::{civilian_profile, enforcer_profile, CivilianProfile, EnforcerProfile};

/// Input to the actor FSM for a single actor.
#[derive(Debug, Clone, Copy)]
pub struct ActorContext {
    pub kind: ActorKind,
    pub state: ActorState,
    pub position: Vec2,
    pub velocity: Vec2,
    pub rotation: f32,
    pub plan: Option<Plan>,
    pub player_position: Vec2,
    /// Any projectile exists anywhere in the arena.
    pub gunfire_detected: bool,
    /// Ticks since mission start.
    pub tick: u64,
}

/// Output from the actor FSM.
#[derive(Debug, Clone, Copy)]
pub struct ActorUpdate {
    pub new_state: ActorState,
    pub new_velocity: Vec2,
    pub new_rotation: f32,
    pub new_plan: Option<Plan>,
    /// Fire one projectile along `new_rotation` this tick.
    pub fire: bool,
    pub state_changed: bool,
}

impl ActorUpdate {
    fn unchanged(ctx: &ActorContext) -> Self {
        Self {
            new_state: ctx.state,
            new_velocity: ctx.velocity,
            new_rotation: ctx.rotation,
            new_plan: ctx.plan,
            fire: false,
            state_changed: false,
        }
    }

    fn with_state(mut self, ctx: &ActorContext, state: ActorState) -> Self {
        self.state_changed = state != ctx.state;
        self.new_state = state;
        self
    }
}

/// Evaluate the FSM for one actor.
pub fn evaluate<R: Rng>(ctx: &ActorContext, rng: &mut R) -> ActorUpdate {
    if ctx.state == ActorState::Dead {
        return ActorUpdate::unchanged(ctx);
    }

    match ctx.kind {
        ActorKind::Civilian => evaluate_civilian(ctx, &civilian_profile(), rng),
        ActorKind::Enemy => evaluate_enforcer(ctx, &enforcer_profile(), rng),
        ActorKind::Player => ActorUpdate::unchanged(ctx),
    }
}

fn evaluate_civilian<R: Rng>(
    ctx: &ActorContext,
    profile: &CivilianProfile,
    rng: &mut R,
) -> ActorUpdate {
    if ctx.gunfire_detected {
        let away = bearing_to(ctx.player_position, ctx.position);
        let jitter = (rng.gen::<f32>() - 0.5) * profile.panic_jitter;
        let heading = away + jitter;
        let update = ActorUpdate {
            new_velocity: heading_vector(heading, profile.panic_speed),
            new_rotation: heading,
            new_plan: Some(Plan::Panic),
            ..ActorUpdate::unchanged(ctx)
        };
        return update.with_state(ctx, ActorState::Alert);
    }

    // Ballistic wandering: velocity only changes on the re-roll tick.
    // The state is left alone, so a panicked civilian stays Alert.
    if ctx.tick % profile.wander_interval_ticks == 0 {
        let heading = rng.gen_range(0.0..std::f32::consts::TAU);
        return ActorUpdate {
            new_velocity: heading_vector(heading, profile.wander_speed),
            new_rotation: heading,
            new_plan: Some(Plan::Commuting),
            ..ActorUpdate::unchanged(ctx)
        };
    }

    ActorUpdate::unchanged(ctx)
}

fn evaluate_enforcer<R: Rng>(
    ctx: &ActorContext,
    profile: &EnforcerProfile,
    rng: &mut R,
) -> ActorUpdate {
    let distance = ctx.position.distance(ctx.player_position);
    let triggered = distance < profile.perception_radius || ctx.gunfire_detected;

    // Untriggered actors coast: state, velocity and facing carry over and
    // nobody fires. A Combat tag is kept once set.
    if !triggered {
        return ActorUpdate::unchanged(ctx);
    }

    let bearing = bearing_to(ctx.position, ctx.player_position);
    let (velocity, plan) = if distance > profile.engage_range {
        (heading_vector(bearing, profile.advance_speed), Plan::Flanking)
    } else {
        (Vec2::ZERO, Plan::Suppressing)
    };

    let update = ActorUpdate {
        new_velocity: velocity,
        new_rotation: bearing,
        new_plan: Some(plan),
        fire: rng.gen_bool(profile.fire_chance),
        ..ActorUpdate::unchanged(ctx)
    };
    update.with_state(ctx, ActorState::Combat)
}
