//! Events emitted by the simulation for UI, audio and log feedback.

use serde::{Deserialize, Serialize};

use crate::mission::MissionOutcome;
use crate::types::ActorId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A projectile left a muzzle.
    ShotFired { owner: ActorId, projectile_id: u64 },
    /// An enforcer switched into combat.
    EnforcerEngaged { id: ActorId },
    /// Civilians started fleeing this tick.
    CiviliansPanicked { count: u32 },
    /// A non-player actor took damage and survived.
    ActorHit {
        victim: ActorId,
        shooter: ActorId,
        health: i32,
    },
    ActorKilled { victim: ActorId, shooter: ActorId },
    PlayerHit { shooter: ActorId, health: i32 },
    PlayerDown { shooter: ActorId },
    MissionComplete { outcome: MissionOutcome },
}
