//! Scheduling of speculative NPC dialogue requests.
//!
//! While combat is under way each published tick rolls a small chance to ask
//! the director for a line. At most one request is in flight; it is keyed by
//! the mission id it was issued for so a reply that lands after a restart is
//! dropped. A successful reply starts a cooldown measured in ticks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use zenith_core::constants::{DIALOGUE_CHANCE, DIALOGUE_COOLDOWN_TICKS};
use zenith_core::state::GameState;

/// Handle to a dialogue request running on a worker.
#[derive(Debug)]
struct InFlight {
    mission_id: u64,
    cancelled: Arc<AtomicBool>,
}

/// What to do with a dialogue reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyVerdict {
    Apply,
    /// The request belongs to a mission that is no longer current.
    Stale,
}

#[derive(Debug)]
pub struct DialogueScheduler {
    chance: f64,
    cooldown_ticks: u64,
    /// No request before this tick.
    quiet_until: u64,
    in_flight: Option<InFlight>,
}

impl Default for DialogueScheduler {
    fn default() -> Self {
        Self::new(DIALOGUE_CHANCE, u64::from(DIALOGUE_COOLDOWN_TICKS))
    }
}

impl DialogueScheduler {
    pub fn new(chance: f64, cooldown_ticks: u64) -> Self {
        Self {
            chance: chance.clamp(0.0, 1.0),
            cooldown_ticks,
            quiet_until: 0,
            in_flight: None,
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Roll for a request against the freshly published `state`.
    pub fn should_request<R: Rng>(&self, state: &GameState, rng: &mut R) -> bool {
        if self.in_flight.is_some() || !state.is_running() || !state.in_combat() {
            return false;
        }
        if state.time.tick < self.quiet_until {
            return false;
        }
        rng.gen_bool(self.chance)
    }

    /// Record a request issued for `mission_id`. The returned flag is raised
    /// if the request is abandoned before it completes.
    pub fn begin(&mut self, mission_id: u64) -> Arc<AtomicBool> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.in_flight = Some(InFlight {
            mission_id,
            cancelled: Arc::clone(&cancelled),
        });
        cancelled
    }

    /// Settle the request issued for `mission_id`. `succeeded_at` carries the
    /// current tick when the director produced a line.
    pub fn finish(&mut self, mission_id: u64, succeeded_at: Option<u64>) -> ReplyVerdict {
        match &self.in_flight {
            Some(pending) if pending.mission_id == mission_id => {
                self.in_flight = None;
                if let Some(tick) = succeeded_at {
                    self.quiet_until = tick.saturating_add(self.cooldown_ticks);
                }
                ReplyVerdict::Apply
            }
            _ => ReplyVerdict::Stale,
        }
    }

    /// Abandon any in-flight request and clear the cooldown. Called when a
    /// mission starts, since the tick counter restarts with it.
    pub fn reset(&mut self) {
        if let Some(pending) = self.in_flight.take() {
            pending.cancelled.store(true, Ordering::Relaxed);
        }
        self.quiet_until = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use zenith_core::enums::ActorState;
    use zenith_core::mission::MissionParams;
    use zenith_sim::engine::{SimConfig, SimulationEngine};

    fn combat_state() -> Arc<GameState> {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.start_mission(MissionParams::default());
        let mut state = (*engine.snapshot()).clone();
        for actor in state.actors.iter_mut().filter(|a| a.is_enforcer()) {
            actor.state = ActorState::Combat;
        }
        Arc::new(state)
    }

    #[test]
    fn test_no_request_outside_combat() {
        let scheduler = DialogueScheduler::new(1.0, 500);
        let engine = SimulationEngine::new(SimConfig::default());
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(!scheduler.should_request(engine.state(), &mut rng));
    }

    #[test]
    fn test_request_rate() {
        let scheduler = DialogueScheduler::default();
        let state = combat_state();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let hits = (0..100_000)
            .filter(|_| scheduler.should_request(&state, &mut rng))
            .count();
        assert!(
            (300..700).contains(&hits),
            "expected roughly 0.5% of ticks, got {hits} in 100000"
        );
    }

    #[test]
    fn test_single_request_in_flight() {
        let mut scheduler = DialogueScheduler::new(1.0, 500);
        let state = combat_state();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        assert!(scheduler.should_request(&state, &mut rng));
        scheduler.begin(state.mission_id);
        assert!(!scheduler.should_request(&state, &mut rng));
    }

    #[test]
    fn test_cooldown_after_success() {
        let mut scheduler = DialogueScheduler::new(1.0, 500);
        let mut state = (*combat_state()).clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        scheduler.begin(state.mission_id);
        assert_eq!(
            scheduler.finish(state.mission_id, Some(100)),
            ReplyVerdict::Apply
        );

        state.time.tick = 599;
        assert!(!scheduler.should_request(&state, &mut rng), "still cooling down");
        state.time.tick = 600;
        assert!(scheduler.should_request(&state, &mut rng));
    }

    #[test]
    fn test_failure_has_no_cooldown() {
        let mut scheduler = DialogueScheduler::new(1.0, 500);
        let mut state = (*combat_state()).clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        scheduler.begin(state.mission_id);
        scheduler.finish(state.mission_id, None);
        state.time.tick = 101;
        assert!(scheduler.should_request(&state, &mut rng));
    }

    #[test]
    fn test_restart_discards_old_reply() {
        let mut scheduler = DialogueScheduler::new(1.0, 500);
        let cancelled = scheduler.begin(1);

        scheduler.reset();
        assert!(cancelled.load(Ordering::Relaxed));
        assert!(!scheduler.in_flight());
        assert_eq!(scheduler.finish(1, Some(10)), ReplyVerdict::Stale);

        scheduler.begin(2);
        assert_eq!(scheduler.finish(1, Some(10)), ReplyVerdict::Stale);
        assert!(scheduler.in_flight(), "reply for another mission leaves the request pending");
        assert_eq!(scheduler.finish(2, Some(10)), ReplyVerdict::Apply);
    }
}
