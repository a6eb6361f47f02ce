use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("game loop is not running")]
    NotRunning,

    #[error("game loop command channel disconnected")]
    Disconnected,
}
