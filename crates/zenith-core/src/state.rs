//! The world model: the complete simulation state published after each tick.
//!
//! Every tick produces a new `GameState` value from the previous one.
//! Observers receive it behind an `Arc` and treat it as read-only.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::events::SimEvent;
use crate::mission::{MissionOutcome, MissionParams};
use crate::types::{ActorId, SimTime, Vec2};

/// Any simulated character: the player, an enforcer, or a civilian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Facing in radians (atan2 convention).
    pub rotation: f32,
    /// Always within `[0, max_health]`.
    pub health: i32,
    pub max_health: i32,
    pub state: ActorState,
    pub plan: Option<Plan>,
}

impl Actor {
    pub fn is_dead(&self) -> bool {
        self.state == ActorState::Dead
    }

    pub fn is_enforcer(&self) -> bool {
        self.kind == ActorKind::Enemy
    }

    pub fn is_civilian(&self) -> bool {
        self.kind == ActorKind::Civilian
    }

    /// Deduct damage, flooring health at zero. Returns true if this blow killed the actor.
    pub fn apply_damage(&mut self, damage: i32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = (self.health - damage).max(0);
        if self.health == 0 {
            self.state = ActorState::Dead;
            self.velocity = Vec2::ZERO;
            self.plan = Some(Plan::Deceased);
            true
        } else {
            false
        }
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u64,
    pub pos: Vec2,
    pub velocity: Vec2,
    /// Shooter; never hit by its own projectile.
    pub owner: ActorId,
    pub damage: i32,
}

/// Static arena segment. Walls never move and are not consulted by movement or collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub start: Vec2,
    pub end: Vec2,
    pub destructible: bool,
    /// Only meaningful for destructible walls.
    pub health: Option<i32>,
}

/// Complete world state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub time: SimTime,
    /// Incremented on every mission start; tags asynchronous requests.
    pub mission_id: u64,
    pub player: Actor,
    /// Civilians followed by enforcers, in spawn order. Dead actors stay.
    pub actors: Vec<Actor>,
    pub projectiles: Vec<Projectile>,
    pub walls: Vec<Wall>,
    pub mission: Option<MissionParams>,
    /// Append-only outcome log.
    pub history: Vec<MissionOutcome>,
    pub is_game_over: bool,
    pub is_mission_active: bool,
    pub last_dialogue: String,
    /// Latched once any enforcer enters combat during the mission.
    pub alarm_raised: bool,
    pub next_projectile_id: u64,
    /// Events produced by the tick that built this state.
    pub events: Vec<SimEvent>,
}

impl GameState {
    /// Display phase derived from the mission flags.
    pub fn phase(&self) -> MissionPhase {
        if self.is_game_over {
            MissionPhase::GameOver
        } else if self.is_mission_active {
            MissionPhase::Active
        } else if self.mission.is_some() {
            MissionPhase::Victory
        } else {
            MissionPhase::Idle
        }
    }

    /// Whether the driver should keep scheduling ticks.
    pub fn is_running(&self) -> bool {
        self.is_mission_active && !self.is_game_over
    }

    pub fn enforcers(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_enforcer())
    }

    pub fn civilians(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_civilian())
    }

    pub fn live_enforcer_count(&self) -> usize {
        self.enforcers().filter(|a| !a.is_dead()).count()
    }

    pub fn dead_enforcer_count(&self) -> usize {
        self.enforcers().filter(|a| a.is_dead()).count()
    }

    /// Whether any enforcer is currently engaging.
    pub fn in_combat(&self) -> bool {
        self.enforcers().any(|a| a.state == ActorState::Combat)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        if id == ActorId::Player {
            return Some(&self.player);
        }
        self.actors.iter().find(|a| a.id == id)
    }

    /// Most recent `window` outcomes, oldest first.
    pub fn recent_history(&self, window: usize) -> &[MissionOutcome] {
        let start = self.history.len().saturating_sub(window);
        &self.history[start..]
    }

    pub fn dialogue_history(&self) -> &[MissionOutcome] {
        self.recent_history(DIALOGUE_HISTORY_WINDOW)
    }

    pub fn mission_history(&self) -> &[MissionOutcome] {
        self.recent_history(MISSION_HISTORY_WINDOW)
    }
}
