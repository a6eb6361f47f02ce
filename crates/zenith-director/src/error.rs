use thiserror::Error;

/// Failures reported by a mission director.
#[derive(Debug, Error)]
pub enum DirectorError {
    #[error("director unavailable: {0}")]
    Unavailable(String),

    #[error("malformed mission payload: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("director returned an empty dialogue line")]
    EmptyDialogue,
}
