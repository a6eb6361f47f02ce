//! The director seam consumed by the game loop.

use zenith_core::mission::{MissionOutcome, MissionParams};

use crate::error::DirectorError;

/// Longest dialogue line shown on the HUD, in words.
pub const DIALOGUE_MAX_WORDS: usize = 20;

/// Generates missions and NPC dialogue from the outcome history.
///
/// Calls may block (network round trips); the game loop always invokes them
/// off the tick thread. `history` is already cut to the relevant window,
/// oldest first.
pub trait MissionDirector: Send + Sync {
    fn generate_mission(&self, history: &[MissionOutcome]) -> Result<MissionParams, DirectorError>;

    fn dialogue(&self, trigger: &str, history: &[MissionOutcome]) -> Result<String, DirectorError>;
}

/// Normalize a raw dialogue reply: collapse whitespace and cap the length.
pub fn clean_dialogue(raw: &str) -> Result<String, DirectorError> {
    let words: Vec<&str> = raw.split_whitespace().take(DIALOGUE_MAX_WORDS).collect();
    if words.is_empty() {
        return Err(DirectorError::EmptyDialogue);
    }
    Ok(words.join(" "))
}
