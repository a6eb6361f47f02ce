//! Offline director: composes missions from the outcome history.
//!
//! Fast clears push enforcer density up, slow clears pull it down and lean on
//! environment (weather, hazards) instead of headcount. Text is drawn from
//! fixed tables with a seeded RNG so a given seed and history always produce
//! the same briefing.

use std::sync::Mutex;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use zenith_core::enums::Lethality;
use zenith_core::mission::{EnemyConfig, Environment, MissionOutcome, MissionParams};

use crate::director::{clean_dialogue, MissionDirector};
use crate::error::DirectorError;
use crate::remote::TARGET_AREA;

/// Density for the first deployment.
pub const BASE_DENSITY: u32 = 4;
pub const MIN_DENSITY: u32 = 2;
pub const MAX_DENSITY: u32 = 12;

/// Clears faster than this escalate.
pub const FAST_CLEAR_SECS: f64 = 30.0;
/// Clears slower than this relax.
pub const SLOW_CLEAR_SECS: f64 = 90.0;

const OBJECTIVES: &[&str] = &[
    "Eliminate the sector guard detail",
    "Break the checkpoint cordon",
    "Neutralize the corporate security sweep",
    "Clear the market of enforcers",
];

const LOCATION_DETAILS: &[&str] = &[
    "beneath the noodle-stall awnings",
    "outside the pachinko arcade",
    "along the flooded maintenance row",
    "under the elevated maglev line",
];

const WEATHER_CALM: &[&str] = &["Light drizzle", "Overcast", "Thin fog"];
const WEATHER_HEAVY: &[&str] = &["Torrential acid rain", "Dense smog", "Electrical storm"];

const LIGHTING: &[&str] = &[
    "Flickering neon",
    "Holographic billboards",
    "Sodium-vapor glare",
    "Blackout, emergency strobes only",
];

const HAZARDS: &[&str] = &[
    "Exposed power conduits",
    "Slick pavement",
    "Panicked crowds",
    "Steam vents",
    "Collapsed scaffolding",
];

const ENEMY_TYPES: &[&str] = &["Sector guard", "Riot enforcer", "Drone handler", "Sniper"];

const TACTICS_BASIC: &[&str] = &["Perimeter patrol", "Checkpoint hold"];
const TACTICS_ESCALATED: &[&str] = &["Sniper overwatch", "Pincer flank", "Suppressing fire"];

const LINES_FEARFUL: &[&str] = &[
    "That's the one who left the last squad in the gutter. Fall back!",
    "Bodies everywhere last time. Nobody wants to be next.",
    "It's the ghost with the body count. Call it in!",
];

const LINES_SUSPICIOUS: &[&str] = &[
    "Too quiet. Same as the last sector. Check the shadows.",
    "Cameras caught nothing again. Someone's slipping through.",
    "Feels like we're being watched. Stay sharp.",
];

const LINES_NEUTRAL: &[&str] = &[
    "Contact! Hostile operator in the market!",
    "Shots fired, sector seven. Requesting backup.",
    "Keep your heads down and your barrels up.",
];

/// Enforcer density for the next mission given the recent history.
pub fn compose_density(history: &[MissionOutcome]) -> u32 {
    let Some(last) = history.last() else {
        return BASE_DENSITY;
    };

    let wins = history.iter().filter(|o| o.success).count() as u32;
    let mut density = BASE_DENSITY + wins;

    if last.time_seconds < FAST_CLEAR_SECS {
        density += 2;
    }
    if last.lethality == Lethality::High {
        density += 1;
    }
    if !last.success || last.time_seconds >= SLOW_CLEAR_SECS {
        density = density.saturating_sub(3);
    }

    density.clamp(MIN_DENSITY, MAX_DENSITY)
}

/// Whether the last mission went badly enough to favour terrain over headcount.
fn struggled(history: &[MissionOutcome]) -> bool {
    history
        .last()
        .is_some_and(|o| !o.success || o.time_seconds >= SLOW_CLEAR_SECS)
}

fn escalated(history: &[MissionOutcome]) -> bool {
    history.last().is_some_and(|o| o.time_seconds < FAST_CLEAR_SECS)
}

fn pick<'a>(rng: &mut ChaCha8Rng, table: &[&'a str]) -> &'a str {
    table.choose(rng).copied().unwrap_or_default()
}

fn pick_many(rng: &mut ChaCha8Rng, table: &[&str], count: usize) -> Vec<String> {
    table
        .choose_multiple(rng, count)
        .map(|s| s.to_string())
        .collect()
}

pub struct ProceduralDirector {
    rng: Mutex<ChaCha8Rng>,
}

impl ProceduralDirector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut ChaCha8Rng) -> T) -> Result<T, DirectorError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| DirectorError::Unavailable("director rng poisoned".into()))?;
        Ok(f(&mut *rng))
    }
}

impl MissionDirector for ProceduralDirector {
    fn generate_mission(&self, history: &[MissionOutcome]) -> Result<MissionParams, DirectorError> {
        let density = compose_density(history);
        let struggled = struggled(history);
        let escalated = escalated(history);

        let params = self.with_rng(|rng| {
            let weather = if struggled {
                pick(rng, WEATHER_HEAVY)
            } else {
                pick(rng, WEATHER_CALM)
            };
            let hazard_count = if struggled { 3 } else { 1 };
            let tactics = if escalated {
                pick_many(rng, TACTICS_ESCALATED, 2)
            } else {
                pick_many(rng, TACTICS_BASIC, 1)
            };
            let type_count = rng.gen_range(1..=2);

            let location = format!("{TARGET_AREA}, {}", pick(rng, LOCATION_DETAILS));
            let narrative_brief = format!(
                "{density} hostiles hold the {}. {weather}. Move fast, leave nothing standing.",
                location.to_lowercase()
            );

            MissionParams {
                location,
                objective: pick(rng, OBJECTIVES).to_string(),
                environment: Environment {
                    weather: weather.to_string(),
                    lighting: pick(rng, LIGHTING).to_string(),
                    hazards: pick_many(rng, HAZARDS, hazard_count),
                },
                enemy_config: EnemyConfig {
                    density: Some(f64::from(density)),
                    types: pick_many(rng, ENEMY_TYPES, type_count),
                    tactics,
                },
                narrative_brief,
            }
        })?;

        debug!(
            density,
            struggled,
            escalated,
            history = history.len(),
            "composed mission"
        );
        Ok(params)
    }

    fn dialogue(&self, trigger: &str, history: &[MissionOutcome]) -> Result<String, DirectorError> {
        let total = history.len().max(1) as f64;
        let lethal = history
            .iter()
            .filter(|o| o.lethality == Lethality::High)
            .count() as f64
            / total;
        let stealthy = history.iter().filter(|o| o.stealth_rating >= 50).count() as f64 / total;

        let table = if history.is_empty() {
            LINES_NEUTRAL
        } else if stealthy > 0.5 {
            LINES_SUSPICIOUS
        } else if lethal > 0.5 {
            LINES_FEARFUL
        } else {
            LINES_NEUTRAL
        };

        let line = self.with_rng(|rng| pick(rng, table))?;
        debug!(trigger, "dialogue composed");
        clean_dialogue(line)
    }
}
