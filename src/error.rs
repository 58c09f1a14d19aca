use thiserror::Error;

/// Library error type for indexing and publishing operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Artifact serialization error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Configuration parsed but holds values the engine cannot run with.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
