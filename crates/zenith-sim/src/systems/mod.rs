//! Systems that advance the world state each tick.
//!
//! Systems are plain functions over `&mut GameState`. They do not own state;
//! the engine runs them in a fixed order on a fresh copy of the previous tick.

pub mod actor_ai;
pub mod collision;
pub mod movement;
pub mod player_control;
pub mod projectiles;
