//! Application state shared between callers and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use zenith_core::commands::InputIntent;
use zenith_core::state::GameState;
use zenith_director::MissionDirector;

use crate::error::LoopError;
use crate::game_loop::{spawn_game_loop, LatestSnapshot, LoopConfig};

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Ask the director for a mission and start it once it arrives.
    StartMission,
    /// Replace the held input intent.
    Input(InputIntent),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running (or not yet started) game loop.
///
/// `Mutex` wraps the sender (Sender is Send but not Sync) and the optional
/// pieces that only exist after `start`.
pub struct AppState {
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling.
    latest_snapshot: LatestSnapshot,
    join_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            join_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop. Returns the per-tick snapshot stream.
    ///
    /// A loop that is already running is shut down first.
    pub fn start(
        &self,
        config: LoopConfig,
        director: Arc<dyn MissionDirector>,
    ) -> Result<mpsc::Receiver<Arc<GameState>>, LoopError> {
        let _ = self.shutdown();

        let (snapshot_tx, snapshot_rx) = mpsc::channel();
        let (command_tx, handle) = spawn_game_loop(
            config,
            director,
            snapshot_tx,
            Arc::clone(&self.latest_snapshot),
        )?;

        if let Ok(mut lock) = self.command_tx.lock() {
            *lock = Some(command_tx);
        }
        if let Ok(mut lock) = self.join_handle.lock() {
            *lock = Some(handle);
        }
        Ok(snapshot_rx)
    }

    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    pub fn send(&self, cmd: GameLoopCommand) -> Result<(), LoopError> {
        let lock = self.command_tx.lock().map_err(|_| LoopError::NotRunning)?;
        let tx = lock.as_ref().ok_or(LoopError::NotRunning)?;
        tx.send(cmd).map_err(|_| LoopError::Disconnected)
    }

    pub fn start_mission(&self) -> Result<(), LoopError> {
        self.send(GameLoopCommand::StartMission)
    }

    pub fn set_input(&self, intent: InputIntent) -> Result<(), LoopError> {
        self.send(GameLoopCommand::Input(intent))
    }

    /// The most recently published snapshot, if the loop has published one.
    pub fn latest(&self) -> Option<Arc<GameState>> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.as_ref().map(Arc::clone))
    }

    /// Stop the loop and wait for its thread to exit.
    pub fn shutdown(&self) -> Result<(), LoopError> {
        let tx = self
            .command_tx
            .lock()
            .ok()
            .and_then(|mut lock| lock.take())
            .ok_or(LoopError::NotRunning)?;
        let _ = tx.send(GameLoopCommand::Shutdown);
        drop(tx);

        let handle = self.join_handle.lock().ok().and_then(|mut lock| lock.take());
        if let Some(handle) = handle {
            let _ = handle.join();
        }
        Ok(())
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
