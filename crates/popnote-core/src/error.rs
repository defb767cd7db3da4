//! Error types for popnote-core

use thiserror::Error;

/// Result type alias using popnote-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in popnote-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage provider error
    #[error("Storage error: {0}")]
    Storage(String),

    /// No async runtime available for background writes
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
