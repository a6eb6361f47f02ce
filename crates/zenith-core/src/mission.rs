//! Mission payloads exchanged with the mission director, and outcome records.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ENFORCER_COUNT, MAX_ENFORCER_COUNT};
use crate::enums::Lethality;

/// Descriptive mission payload supplied by the director.
///
/// Opaque to the simulation apart from `enemy_config.density` (enforcer count)
/// and `objective` (shown on the HUD).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionParams {
    pub location: String,
    pub objective: String,
    pub environment: Environment,
    pub enemy_config: EnemyConfig,
    pub narrative_brief: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(default)]
    pub weather: String,
    #[serde(default)]
    pub lighting: String,
    #[serde(default)]
    pub hazards: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyConfig {
    /// Requested enforcer count. Arrives as a JSON number and may be fractional or absent.
    #[serde(default)]
    pub density: Option<f64>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub tactics: Vec<String>,
}

impl EnemyConfig {
    /// Number of enforcers to spawn.
    ///
    /// A fractional density rounds up. Absent, zero, negative or non-finite
    /// densities fall back to the default.
    pub fn enforcer_count(&self) -> u32 {
        match self.density {
            Some(d) if d.is_finite() && d > 0.0 => {
                d.ceil().min(MAX_ENFORCER_COUNT as f64) as u32
            }
            _ => DEFAULT_ENFORCER_COUNT,
        }
    }
}

/// Record appended to the history when a mission is won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionOutcome {
    pub success: bool,
    pub time_seconds: f64,
    pub kills: u32,
    /// 0-100, higher is stealthier.
    pub stealth_rating: u32,
    pub lethality: Lethality,
}
