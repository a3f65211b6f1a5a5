//! Completion engine error types

use thiserror::Error;

/// Errors raised inside the completion engine.
///
/// None of these reach the caller of [`crate::CompletionEngine::resolve`]; the resolver absorbs
/// them into an empty suggestion. They do propagate from construction-time APIs such as
/// [`crate::PatternRegistry::build`] and [`crate::ConfigLoader`].
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Invalid pattern '{key}': {message}")]
    InvalidPattern { key: String, message: String },

    #[error("Duplicate pattern key: {key}")]
    DuplicatePattern { key: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for completion operations
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;
