//! Scripted input source for headless runs: hold position, face the nearest
//! live enforcer and keep the trigger down.

use zenith_core::commands::InputIntent;
use zenith_core::state::{Actor, GameState};

pub fn nearest_enforcer(state: &GameState) -> Option<&Actor> {
    let origin = state.player.pos;
    state
        .enforcers()
        .filter(|a| !a.is_dead())
        .min_by(|a, b| {
            origin
                .distance_squared(a.pos)
                .total_cmp(&origin.distance_squared(b.pos))
        })
}

/// Input for the next tick. Holds fire only while there is a target.
pub fn steer(state: &GameState) -> InputIntent {
    match nearest_enforcer(state) {
        Some(target) => InputIntent {
            aim: target.pos,
            fire: true,
            ..InputIntent::default()
        },
        None => InputIntent::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zenith_core::mission::MissionParams;
    use zenith_core::types::Vec2;
    use zenith_sim::engine::{SimConfig, SimulationEngine};

    fn mission_state() -> GameState {
        let mut engine = SimulationEngine::new(SimConfig::default());
        (*engine.start_mission(MissionParams::default())).clone()
    }

    #[test]
    fn test_targets_nearest_live_enforcer() {
        let mut state = mission_state();
        let guards: Vec<usize> = state
            .actors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_enforcer())
            .map(|(i, _)| i)
            .collect();

        for (n, &i) in guards.iter().enumerate() {
            state.actors[i].pos = Vec2::new(100.0 + n as f32 * 50.0, 100.0);
        }
        let closest = guards[guards.len() - 1];
        state.actors[closest].pos = Vec2::new(400.0, 650.0);

        let intent = steer(&state);
        assert!(intent.fire);
        assert_eq!(intent.aim, Vec2::new(400.0, 650.0));
        assert!(!intent.moves.up && !intent.moves.down && !intent.moves.left && !intent.moves.right);

        state.actors[closest].apply_damage(1000);
        let intent = steer(&state);
        assert_ne!(intent.aim, Vec2::new(400.0, 650.0), "corpses are not targets");
    }

    #[test]
    fn test_holds_fire_without_targets() {
        let mut state = mission_state();
        for actor in state.actors.iter_mut().filter(|a| a.is_enforcer()) {
            actor.apply_damage(1000);
        }
        assert!(!steer(&state).fire);
    }
}
