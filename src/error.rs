//! Application-wide error types.
//!
//! This module defines the main error type hierarchy for the application.
//! Widget-level failures are turned into user messages where they happen;
//! only setup failures travel up as `AppError`.

pub use crate::audio::AudioError;
pub use crate::config::ConfigError;
pub use crate::openai::OpenAiError;
pub use crate::storage::StorageError;
pub use crate::weather::WeatherError;

/// Main application error type.
///
/// This is the top-level error type that encompasses all error types
/// in the application. It uses `thiserror` for automatic error derivation
/// and conversion.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Weather service errors
    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    /// Text and speech service errors
    #[error("OpenAI service error: {0}")]
    OpenAi(#[from] OpenAiError),

    /// To-do storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Audio playback errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Logger initialization errors
    #[error("Logger error: {0}")]
    Logger(String),
}

/// Convenience type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
