//! Headless runner: plays a series of missions against the procedural
//! director with the autopilot at the controls and logs each outcome.

use std::process::ExitCode;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use zenith_app::{autopilot, AppConfig, AppState, LoopConfig, LoopError};
use zenith_core::state::GameState;
use zenith_director::ProceduralDirector;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// How one headless mission ended.
enum RunEnd {
    Victory,
    Defeat,
    TimedOut,
}

/// Drive one mission to its end, feeding autopilot input on every snapshot.
fn play_mission(
    app: &AppState,
    snapshots: &mpsc::Receiver<Arc<GameState>>,
    limit: Duration,
) -> Result<RunEnd, LoopError> {
    let previous_id = app.latest().map(|s| s.mission_id).unwrap_or(0);
    app.start_mission()?;

    let deadline = Instant::now() + limit;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        let snapshot = match snapshots.recv_timeout(remaining) {
            Ok(snapshot) => snapshot,
            Err(RecvTimeoutError::Timeout) => return Ok(RunEnd::TimedOut),
            Err(RecvTimeoutError::Disconnected) => return Err(LoopError::Disconnected),
        };

        // Snapshots from before the deployment are still draining.
        if snapshot.mission_id <= previous_id {
            continue;
        }
        if snapshot.is_game_over {
            return Ok(RunEnd::Defeat);
        }
        if !snapshot.is_mission_active {
            return Ok(RunEnd::Victory);
        }
        app.set_input(autopilot::steer(&snapshot))?;
    }
}

fn run(config: AppConfig) -> Result<(), LoopError> {
    let app = AppState::new();
    let director = Arc::new(ProceduralDirector::new(config.seed));
    let snapshots = app.start(LoopConfig::from(&config), director)?;

    for round in 1..=config.missions {
        match play_mission(&app, &snapshots, config.max_mission_duration())? {
            RunEnd::Victory => {
                let outcome = app.latest().and_then(|s| s.history.last().cloned());
                if let Some(outcome) = outcome {
                    info!(
                        round,
                        kills = outcome.kills,
                        time_secs = outcome.time_seconds,
                        stealth = outcome.stealth_rating,
                        "sector cleared"
                    );
                }
            }
            RunEnd::Defeat => info!(round, "operator down"),
            RunEnd::TimedOut => warn!(round, limit_secs = config.max_mission_secs, "mission timed out"),
        }
    }

    if let Some(state) = app.latest() {
        let history = serde_json::to_string(&state.history).unwrap_or_default();
        info!(missions = state.history.len(), %history, "campaign finished");
    }
    app.shutdown()
}

fn main() -> ExitCode {
    init_tracing();
    let config = AppConfig::from_env();
    info!(?config, "starting zenith");

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "zenith stopped");
            ExitCode::FAILURE
        }
    }
}
