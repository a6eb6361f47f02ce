//! Director backed by an external JSON service.
//!
//! The transport is injected so the wire (HTTP client, IPC bridge, test
//! double) stays outside this crate. Requests carry the trimmed history
//! window; replies are raw text validated here.

use serde::Serialize;
use tracing::debug;

use zenith_core::constants::{DIALOGUE_HISTORY_WINDOW, MISSION_HISTORY_WINDOW};
use zenith_core::mission::{MissionOutcome, MissionParams};

use crate::director::{clean_dialogue, MissionDirector};
use crate::error::DirectorError;
use crate::schema::parse_mission_params;

/// Area every generated mission is staged in.
pub const TARGET_AREA: &str = "Crowded, Rain-Slicked Neo-Tokyo Alleyway";

/// Request body sent to the external service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DirectorRequest {
    #[serde(rename_all = "camelCase")]
    Mission {
        target_area: String,
        history: Vec<MissionOutcome>,
    },
    #[serde(rename_all = "camelCase")]
    Dialogue {
        trigger: String,
        history: Vec<MissionOutcome>,
    },
}

/// Delivers a request and returns the raw reply body.
pub trait Transport: Send + Sync {
    fn send(&self, request: &DirectorRequest) -> Result<String, DirectorError>;
}

impl<F> Transport for F
where
    F: Fn(&DirectorRequest) -> Result<String, DirectorError> + Send + Sync,
{
    fn send(&self, request: &DirectorRequest) -> Result<String, DirectorError> {
        self(request)
    }
}

pub struct RemoteDirector<T> {
    transport: T,
}

impl<T: Transport> RemoteDirector<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }
}

fn tail(history: &[MissionOutcome], window: usize) -> Vec<MissionOutcome> {
    history[history.len().saturating_sub(window)..].to_vec()
}

impl<T: Transport> MissionDirector for RemoteDirector<T> {
    fn generate_mission(&self, history: &[MissionOutcome]) -> Result<MissionParams, DirectorError> {
        let request = DirectorRequest::Mission {
            target_area: TARGET_AREA.to_string(),
            history: tail(history, MISSION_HISTORY_WINDOW),
        };
        let body = self.transport.send(&request)?;
        debug!(bytes = body.len(), "mission payload received");
        parse_mission_params(&body)
    }

    fn dialogue(&self, trigger: &str, history: &[MissionOutcome]) -> Result<String, DirectorError> {
        let request = DirectorRequest::Dialogue {
            trigger: trigger.to_string(),
            history: tail(history, DIALOGUE_HISTORY_WINDOW),
        };
        let body = self.transport.send(&request)?;
        clean_dialogue(&body)
    }
}
