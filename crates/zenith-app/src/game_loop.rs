//! Game loop thread: owns the simulation engine, ticks it at display-refresh
//! cadence while a mission runs and publishes every snapshot.
//!
//! The engine is created inside this thread. Commands arrive via `mpsc`.
//! Director calls block, so each one runs on a short-lived worker thread and
//! reports back through a second channel; the tick never waits on them.
//! With no mission running and nothing outstanding the thread parks on the
//! command channel.

use std::sync::atomic::Ordering;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use zenith_core::constants::{COMBAT_DIALOGUE_TRIGGER, DIALOGUE_CHANCE, DIALOGUE_COOLDOWN_TICKS};
use zenith_core::mission::MissionParams;
use zenith_core::state::GameState;
use zenith_director::{DirectorError, MissionDirector};
use zenith_sim::engine::{SimConfig, SimulationEngine};

use crate::config::AppConfig;
use crate::dialogue::{DialogueScheduler, ReplyVerdict};
use crate::error::LoopError;
use crate::state::GameLoopCommand;

/// Shared slot holding the most recently published snapshot.
pub type LatestSnapshot = Arc<Mutex<Option<Arc<GameState>>>>;

#[derive(Debug, Clone, Copy)]
pub struct LoopConfig {
    pub sim: SimConfig,
    pub tick_interval: Duration,
    /// Per-tick chance of asking for dialogue while enforcers are in combat.
    pub dialogue_chance: f64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for LoopConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            sim: SimConfig {
                seed: config.seed,
                ..SimConfig::default()
            },
            tick_interval: config.tick_interval(),
            dialogue_chance: DIALOGUE_CHANCE,
        }
    }
}

/// Results coming back from director workers.
enum DirectorReply {
    Mission(Result<MissionParams, DirectorError>),
    Dialogue {
        mission_id: u64,
        result: Result<String, DirectorError>,
    },
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. Every snapshot is sent
/// on `snapshot_tx` and stored in `latest_snapshot`.
pub fn spawn_game_loop(
    config: LoopConfig,
    director: Arc<dyn MissionDirector>,
    snapshot_tx: mpsc::Sender<Arc<GameState>>,
    latest_snapshot: LatestSnapshot,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), LoopError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("zenith-game-loop".into())
        .spawn(move || {
            let mut game_loop = GameLoop::new(config, director, snapshot_tx, latest_snapshot);
            game_loop.run(cmd_rx);
        })?;

    Ok((cmd_tx, handle))
}

struct GameLoop {
    engine: SimulationEngine,
    director: Arc<dyn MissionDirector>,
    tick_interval: Duration,
    snapshot_tx: mpsc::Sender<Arc<GameState>>,
    latest_snapshot: LatestSnapshot,
    reply_tx: mpsc::Sender<DirectorReply>,
    reply_rx: mpsc::Receiver<DirectorReply>,
    mission_pending: bool,
    dialogue: DialogueScheduler,
    dialogue_rng: ChaCha8Rng,
}

impl GameLoop {
    fn new(
        config: LoopConfig,
        director: Arc<dyn MissionDirector>,
        snapshot_tx: mpsc::Sender<Arc<GameState>>,
        latest_snapshot: LatestSnapshot,
    ) -> Self {
        let (reply_tx, reply_rx) = mpsc::channel();
        Self {
            engine: SimulationEngine::new(config.sim),
            director,
            tick_interval: config.tick_interval,
            snapshot_tx,
            latest_snapshot,
            reply_tx,
            reply_rx,
            mission_pending: false,
            dialogue: DialogueScheduler::new(
                config.dialogue_chance,
                u64::from(DIALOGUE_COOLDOWN_TICKS),
            ),
            dialogue_rng: ChaCha8Rng::seed_from_u64(config.sim.seed.wrapping_add(1)),
        }
    }

    /// Runs until Shutdown or until every command sender is dropped.
    fn run(&mut self, cmd_rx: mpsc::Receiver<GameLoopCommand>) {
        self.publish(self.engine.snapshot());
        let mut next_tick_time = Instant::now();
        let mut last_tick = Instant::now();

        loop {
            // 1. Dormant: park until a command arrives.
            if !self.engine.is_running() && !self.awaiting_director() {
                match cmd_rx.recv() {
                    Ok(cmd) => {
                        if !self.handle_command(cmd) {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }

            // 2. Drain pending commands.
            if !self.drain_commands(&cmd_rx) {
                break;
            }

            // 3. Apply director results.
            let was_running = self.engine.is_running();
            self.drain_replies();
            if self.engine.is_running() && !was_running {
                next_tick_time = Instant::now();
                last_tick = next_tick_time;
            }

            // 4. Advance one tick.
            if self.engine.is_running() {
                let now = Instant::now();
                let dt = now.duration_since(last_tick).as_secs_f32();
                last_tick = now;

                let snapshot = self.engine.tick(dt);
                self.maybe_request_dialogue(&snapshot);
                self.publish(snapshot);
            }

            // 5. Sleep until the next tick.
            next_tick_time += self.tick_interval;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > self.tick_interval * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }

        self.dialogue.reset();
        debug!("game loop stopped");
    }

    fn awaiting_director(&self) -> bool {
        self.mission_pending || self.dialogue.in_flight()
    }

    /// Returns false when the loop should stop.
    fn drain_commands(&mut self, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
        loop {
            match cmd_rx.try_recv() {
                Ok(cmd) => {
                    if !self.handle_command(cmd) {
                        return false;
                    }
                }
                Err(mpsc::TryRecvError::Empty) => return true,
                Err(mpsc::TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn handle_command(&mut self, cmd: GameLoopCommand) -> bool {
        match cmd {
            GameLoopCommand::StartMission => self.request_mission(),
            GameLoopCommand::Input(intent) => self.engine.set_input(intent),
            GameLoopCommand::Shutdown => return false,
        }
        true
    }

    fn request_mission(&mut self) {
        if self.mission_pending {
            debug!("mission request already in flight");
            return;
        }

        let history = self.engine.state().mission_history().to_vec();
        let director = Arc::clone(&self.director);
        let reply_tx = self.reply_tx.clone();
        let spawned = std::thread::Builder::new()
            .name("zenith-mission-request".into())
            .spawn(move || {
                let result = director.generate_mission(&history);
                let _ = reply_tx.send(DirectorReply::Mission(result));
            });

        match spawned {
            Ok(_) => self.mission_pending = true,
            Err(e) => error!(error = %e, "failed to spawn mission request"),
        }
    }

    fn maybe_request_dialogue(&mut self, snapshot: &GameState) {
        if !self.dialogue.should_request(snapshot, &mut self.dialogue_rng) {
            return;
        }

        let mission_id = snapshot.mission_id;
        let history = snapshot.dialogue_history().to_vec();
        let director = Arc::clone(&self.director);
        let reply_tx = self.reply_tx.clone();
        let cancelled = self.dialogue.begin(mission_id);

        let spawned = std::thread::Builder::new()
            .name("zenith-dialogue-request".into())
            .spawn(move || {
                let result = director.dialogue(COMBAT_DIALOGUE_TRIGGER, &history);
                if cancelled.load(Ordering::Relaxed) {
                    return;
                }
                let _ = reply_tx.send(DirectorReply::Dialogue { mission_id, result });
            });

        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn dialogue request");
            self.dialogue.finish(mission_id, None);
        }
    }

    fn drain_replies(&mut self) {
        while let Ok(reply) = self.reply_rx.try_recv() {
            match reply {
                DirectorReply::Mission(result) => {
                    self.mission_pending = false;
                    self.on_mission(result);
                }
                DirectorReply::Dialogue { mission_id, result } => {
                    self.on_dialogue(mission_id, result);
                }
            }
        }
    }

    fn on_mission(&mut self, result: Result<MissionParams, DirectorError>) {
        match result {
            Ok(params) => {
                self.dialogue.reset();
                let snapshot = self.engine.start_mission(params);
                info!(mission_id = snapshot.mission_id, "mission deployed");
                self.publish(snapshot);
            }
            Err(e) => {
                error!(error = %e, "mission generation failed, staying on standby");
            }
        }
    }

    fn on_dialogue(&mut self, mission_id: u64, result: Result<String, DirectorError>) {
        let tick = self.engine.state().time.tick;
        match result {
            Ok(line) => {
                if self.dialogue.finish(mission_id, Some(tick)) == ReplyVerdict::Stale {
                    debug!(mission_id, "discarding stale dialogue");
                    return;
                }
                self.engine.update_dialogue(line);
                self.publish(self.engine.snapshot());
            }
            Err(e) => {
                self.dialogue.finish(mission_id, None);
                warn!(error = %e, mission_id, "dialogue request failed");
            }
        }
    }

    fn publish(&self, snapshot: Arc<GameState>) {
        if let Ok(mut lock) = self.latest_snapshot.lock() {
            *lock = Some(Arc::clone(&snapshot));
        }
        let _ = self.snapshot_tx.send(snapshot);
    }
}
