//! Driver process for the Zenith arena.
//!
//! Runs the simulation on a dedicated game-loop thread at display-refresh
//! cadence, forwards commands over a channel, publishes a snapshot per tick
//! and calls the mission director off-thread.

pub mod autopilot;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod game_loop;
pub mod state;

pub use config::AppConfig;
pub use error::LoopError;
pub use game_loop::LoopConfig;
pub use state::{AppState, GameLoopCommand};
