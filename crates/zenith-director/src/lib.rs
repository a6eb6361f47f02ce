//! Mission director for the Zenith arena.
//!
//! The director is the collaborator that turns the outcome history into the
//! next mission's parameters and reacts to combat with short dialogue lines.
//! `MissionDirector` is the seam; `RemoteDirector` speaks JSON over a
//! pluggable transport and `ProceduralDirector` composes missions offline.

pub mod director;
pub mod error;
pub mod procedural;
pub mod remote;
pub mod schema;

pub use director::{clean_dialogue, MissionDirector};
pub use error::DirectorError;
pub use procedural::ProceduralDirector;
pub use remote::{DirectorRequest, RemoteDirector, Transport};
pub use schema::parse_mission_params;
