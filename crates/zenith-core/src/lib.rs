//! Core types and definitions for the Zenith arena simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! actors, projectiles, mission payloads, input intent, events, and constants.
//! It has no dependency on threads, channels, or any runtime framework.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod mission;
pub mod state;
pub mod types;
