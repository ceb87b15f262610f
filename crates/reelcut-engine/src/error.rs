//! Engine error types.

use reelcut_models::ModelError;
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

/// Fatal engine errors. Non-fatal conditions are reported as
/// [`Diagnostic`](crate::Diagnostic) values instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn malformed_input(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Whether the error was caused by the caller's documents rather than by rendering or IO.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EngineError::MalformedInput(_) | EngineError::InvalidInput(_)
        )
    }
}

impl From<ModelError> for EngineError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::MalformedInput(msg) => Self::MalformedInput(msg),
            ModelError::Json(e) => Self::MalformedInput(format!("invalid JSON document: {}", e)),
        }
    }
}
