//! Error types for input parsing and validation.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while turning input documents into validated models.
///
/// Both variants mean the whole document is rejected; nothing downstream
/// ever sees a partially validated index or scenario.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    /// Create a malformed input error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }
}
