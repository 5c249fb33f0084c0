//! Domain-specific error types for the review response engine

use thiserror::Error;

/// Main error type for the review response engine
#[derive(Error, Debug)]
pub enum ReviewEngineError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<serde_json::Error> for ReviewEngineError {
    fn from(err: serde_json::Error) -> Self {
        ReviewEngineError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Convenience Result type alias for the engine
pub type Result<T> = std::result::Result<T, ReviewEngineError>;
