//! Simulation engine: the explicit context that owns one running session.
//!
//! `SimulationEngine` holds the current `GameState` behind an `Arc`, the RNG
//! and the latest input intent. Each tick runs the pure `step` function on the
//! previous state and swaps in the result, so observers holding an older
//! snapshot never see it change. Completely headless.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use zenith_core::commands::InputIntent;
use zenith_core::constants::MAX_FRAME_DT;
use zenith_core::mission::MissionParams;
use zenith_core::state::GameState;

use crate::mission;
use crate::systems;
use crate::world_setup;

/// Configuration for a new simulation context.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for spawns, AI jitter and enforcer fire rolls.
    pub seed: u64,
    /// Cap on elapsed seconds integrated per tick.
    pub max_frame_dt: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// Advance `prev` by one tick of `dt` seconds under `input`.
///
/// Order: input -> AI -> movement -> projectiles -> collision -> completion.
pub fn step(prev: &GameState, input: &InputIntent, dt: f32, rng: &mut ChaCha8Rng) -> GameState {
    let mut next = prev.clone();
    next.events.clear();
    next.time.advance(dt);

    systems::player_control::run(&mut next, input);
    systems::actor_ai::run(&mut next, rng);
    systems::movement::run_player(&mut next, dt);
    systems::movement::run_actors(&mut next, dt);
    systems::projectiles::run(&mut next, dt);
    systems::collision::run(&mut next);
    mission::check_completion(&mut next);

    next
}

/// One simulation session. Create one per game; drop it to tear down.
pub struct SimulationEngine {
    state: Arc<GameState>,
    input: InputIntent,
    rng: ChaCha8Rng,
    max_frame_dt: f32,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            state: Arc::new(world_setup::initial_state()),
            input: InputIntent::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            max_frame_dt: config.max_frame_dt,
        }
    }

    /// The latest published snapshot.
    pub fn state(&self) -> &Arc<GameState> {
        &self.state
    }

    /// A shared handle to the latest snapshot.
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.state)
    }

    /// Whether ticks should keep being scheduled.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn mission_id(&self) -> u64 {
        self.state.mission_id
    }

    /// Replace the input intent used by subsequent ticks.
    pub fn set_input(&mut self, input: InputIntent) {
        self.input = input;
    }

    /// Start (or restart) a mission with the given parameters.
    pub fn start_mission(&mut self, params: MissionParams) -> Arc<GameState> {
        let next = mission::start_mission(&self.state, params, &mut self.rng);
        self.state = Arc::new(next);
        self.snapshot()
    }

    /// Replace the dialogue line shown to the player.
    pub fn update_dialogue(&mut self, text: impl Into<String>) {
        Arc::make_mut(&mut self.state).last_dialogue = text.into();
    }

    /// Advance one tick with `dt` elapsed seconds and return the new snapshot.
    ///
    /// While no mission is running the state is returned unchanged.
    pub fn tick(&mut self, dt: f32) -> Arc<GameState> {
        if !self.is_running() {
            return self.snapshot();
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.max_frame_dt)
        } else {
            0.0
        };

        let next = step(&self.state, &self.input, dt, &mut self.rng);
        self.state = Arc::new(next);
        self.snapshot()
    }

    /// Mutable access to the current state for test setups.
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        Arc::make_mut(&mut self.state)
    }
}
