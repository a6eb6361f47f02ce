//! Archetype-specific behavioural profiles.
//!
//! Consolidates per-archetype parameters for the actor FSM.

use zenith_core::constants::*;

/// Crowd behaviour for civilians.
#[derive(Debug, Clone, Copy)]
pub struct CivilianProfile {
    /// Calm walking speed.
    pub wander_speed: f32,
    /// Ticks between heading re-rolls while calm.
    pub wander_interval_ticks: u64,
    /// Flight speed once gunfire is heard.
    pub panic_speed: f32,
    /// Total width of the random jitter added to the flee heading (radians).
    pub panic_jitter: f32,
}

/// Combat behaviour for hostile enforcers.
#[derive(Debug, Clone, Copy)]
pub struct EnforcerProfile {
    /// Distance at which the player is noticed.
    pub perception_radius: f32,
    /// Preferred engagement distance; closer than this the enforcer holds.
    pub engage_range: f32,
    pub advance_speed: f32,
    /// Per-tick probability of firing while in combat.
    pub fire_chance: f64,
    pub projectile_speed: f32,
}

pub fn civilian_profile() -> CivilianProfile {
    CivilianProfile {
        wander_speed: CIVILIAN_WANDER_SPEED,
        wander_interval_ticks: CIVILIAN_WANDER_INTERVAL_TICKS,
        panic_speed: CIVILIAN_PANIC_SPEED,
        panic_jitter: CIVILIAN_PANIC_JITTER,
    }
}

pub fn enforcer_profile() -> EnforcerProfile {
    EnforcerProfile {
        perception_radius: ENFORCER_PERCEPTION_RADIUS,
        engage_range: ENFORCER_ENGAGE_RANGE,
        advance_speed: ENFORCER_ADVANCE_SPEED,
        fire_chance: ENFORCER_FIRE_CHANCE,
        projectile_speed: ENFORCER_PROJECTILE_SPEED,
    }
}
