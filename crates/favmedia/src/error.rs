//! Error types for favmedia
//!
//! Storage-level errors. The favorites store folds these into its outcome
//! enums; they only reach callers who use a `KeyValueStore` directly.

use thiserror::Error;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    /// Stored bytes could not be turned into a value
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for favmedia
pub type Result<T> = std::result::Result<T, AppError>;
