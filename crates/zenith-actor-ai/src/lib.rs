//! Actor AI for the Zenith arena.
//!
//! Implements the civilian and enforcer behaviour state machines and their
//! archetype-specific tuning profiles.

pub mod fsm;
pub mod profiles;

pub use zenith_core as core;
