//! JSON mission payloads.
//!
//! Payloads use the camelCase layout of `MissionParams`:
//! `location`, `objective`, `environment{weather, lighting, hazards[]}`,
//! `enemyConfig{density, types[], tactics[]}`, `narrativeBrief`.
//! All five top-level fields are required. Fields inside `environment` and
//! `enemyConfig` may be omitted and default to empty.

use zenith_core::mission::MissionParams;

use crate::error::DirectorError;

/// Parse and validate a mission payload.
pub fn parse_mission_params(json: &str) -> Result<MissionParams, DirectorError> {
    let params: MissionParams = serde_json::from_str(json)?;
    Ok(params)
}
