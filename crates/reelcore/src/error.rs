use thiserror::Error;

use crate::config::ConfigError;
use crate::extract::ExtractError;
use crate::session::SessionError;

/// Centralized error type for the library
///
/// Stage-level errors ([`ExtractError`], [`SessionError`]) keep their own
/// enums so each failure mode stays distinguishable; this enum is what the
/// binary sees at its boundaries (startup, CLI fetch).
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// yt-dlp extraction errors
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Per-message session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Logger already installed
    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
