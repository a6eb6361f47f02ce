//! Simulation engine for the Zenith arena.
//!
//! Owns the per-tick step (AI, movement, projectiles, collision, mission
//! completion), the mission lifecycle, and the explicit `SimulationEngine`
//! context that publishes an immutable `GameState` snapshot after each tick.

pub mod engine;
pub mod mission;
pub mod systems;
pub mod world_setup;

pub use engine::{step, SimConfig, SimulationEngine};
pub use zenith_core as core;

#[cfg(test)]
mod tests;
