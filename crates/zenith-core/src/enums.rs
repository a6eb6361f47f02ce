//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Fixed category of an actor, determining its behaviour set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    Player,
    Enemy,
    Civilian,
}

/// Behavioural state of an actor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorState {
    #[default]
    Idle,
    Patrol,
    /// Civilians only: panicking away from gunfire.
    Alert,
    /// Enforcers only: engaging the player.
    Combat,
    /// Terminal. The actor stays in the roster as an inert corpse.
    Dead,
}

/// How lethal the operator was during a mission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lethality {
    Low,
    Medium,
    #[default]
    High,
}

/// Top-level mission phase, derived from the state flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    /// No mission has been started yet.
    #[default]
    Idle,
    Active,
    /// All enforcers eliminated; awaiting the next mission.
    Victory,
    /// Operator down; awaiting a redeploy.
    GameOver,
}

/// Advisory description of what an actor is currently doing.
///
/// Display only; nothing in the simulation branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Plan {
    Browsing,
    Commuting,
    Panic,
    Perimeter,
    Flanking,
    Suppressing,
    Deceased,
}

impl Plan {
    /// Human-readable labels, most immediate first.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            Plan::Browsing => &["Navigating Market", "Neural Browsing"],
            Plan::Commuting => &["Window Shopping", "Commuting"],
            Plan::Panic => &["PANIC", "EVADE DANGER"],
            Plan::Perimeter => &["Sector Perimeter Check", "Querying Central Intel"],
            Plan::Flanking => &["Flanking Target", "Closing Gap"],
            Plan::Suppressing => &["Suppressing Operator", "Holding Ground"],
            Plan::Deceased => &["DECEASED"],
        }
    }
}
