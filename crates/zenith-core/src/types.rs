//! Fundamental geometric and simulation types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 2D vector in arena space (units, +x right, +y down).
pub use glam::Vec2;

/// Bearing from one point to another in radians (atan2 convention, 0 = +x).
pub fn bearing_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Vector of the given length pointing along `angle`.
pub fn heading_vector(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos() * length, angle.sin() * length)
}

/// Whether `pos` lies strictly inside the square `(0, size)` on both axes.
pub fn strictly_inside(pos: Vec2, size: f32) -> bool {
    pos.x > 0.0 && pos.x < size && pos.y > 0.0 && pos.y < size
}

/// Stable identity of an actor within one mission.
///
/// Renders as `player`, `civ-<n>` or `sector-guard-<n>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorId {
    Player,
    Civilian(u32),
    Enforcer(u32),
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActorId::Player => f.write_str("player"),
            ActorId::Civilian(n) => write!(f, "civ-{n}"),
            ActorId::Enforcer(n) => write!(f, "sector-guard-{n}"),
        }
    }
}

/// Error returned when a string is not a recognised actor id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActorIdError(pub String);

impl fmt::Display for ParseActorIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid actor id `{}`", self.0)
    }
}

impl std::error::Error for ParseActorIdError {}

impl FromStr for ActorId {
    type Err = ParseActorIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_index = |rest: &str| {
            rest.parse::<u32>()
                .map_err(|_| ParseActorIdError(s.to_string()))
        };
        if s == "player" {
            Ok(ActorId::Player)
        } else if let Some(rest) = s.strip_prefix("civ-") {
            parse_index(rest).map(ActorId::Civilian)
        } else if let Some(rest) = s.strip_prefix("sector-guard-") {
            parse_index(rest).map(ActorId::Enforcer)
        } else {
            Err(ParseActorIdError(s.to_string()))
        }
    }
}

impl Serialize for ActorId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActorId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Simulation time tracking, relative to the current mission start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Ticks since the mission started.
    pub tick: u64,
    /// Wall-clock seconds integrated since the mission started.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }

    /// Mission time in seconds at the nominal tick rate.
    pub fn nominal_secs(&self) -> f64 {
        self.tick as f64 / crate::constants::TICK_RATE as f64
    }
}
