//! Runtime settings and compile-time limits
//!
//! Product constants (delay, upload limit, caption limit, recognized
//! extensions, format preference) live in [`limits`] and are fixed at build
//! time. Deployment values (token, yt-dlp binary, temp root, ...) are read
//! once at startup into [`Settings`], which is then shared read-only.

use secrecy::SecretString;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Product limits
pub mod limits {
    use super::Duration;

    /// Delay between acknowledging a link and starting the download (in seconds)
    pub const REPLY_DELAY_SECS: u64 = 10;

    /// Largest video we try to upload (in bytes)
    pub const MAX_UPLOAD_BYTES: u64 = 2_000_000_000;

    /// Telegram caption limit (in characters)
    pub const MAX_CAPTION_CHARS: usize = 1024;

    /// Extensions recognized as a finished video download (lowercase, no dot)
    pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm", "mov", "m4v"];

    /// yt-dlp format selector: single mp4 stream, then best video+audio, then best anything
    pub const FORMAT_PREFERENCE: &str = "best[ext=mp4]/bestvideo*+bestaudio/best";

    /// Prefix for per-session working directories
    pub const WORKDIR_PREFIX: &str = "reelgrab_";

    /// Reply delay duration
    pub fn reply_delay() -> Duration {
        Duration::from_secs(REPLY_DELAY_SECS)
    }
}

/// Extraction worker pool configuration
pub mod extraction {
    /// Default number of yt-dlp processes allowed to run at once
    pub const DEFAULT_MAX_CONCURRENT: usize = 4;
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Large video uploads can take several minutes.
    pub const REQUEST_TIMEOUT_SECS: u64 = 900;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither BOT_TOKEN nor TELOXIDE_TOKEN is set
    #[error("BOT_TOKEN environment variable not set")]
    MissingToken,

    /// An environment value could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

/// Process-wide settings, constructed once at startup
#[derive(Debug)]
pub struct Settings {
    /// Bot API token (BOT_TOKEN, falls back to TELOXIDE_TOKEN)
    pub bot_token: Option<SecretString>,
    /// Pause before the download starts
    pub reply_delay: Duration,
    /// Upload size limit in bytes
    pub max_upload_bytes: u64,
    /// Caption limit in characters
    pub max_caption_chars: usize,
    /// yt-dlp binary (YTDL_BIN)
    pub ytdl_bin: String,
    /// Netscape cookies file passed to yt-dlp (YTDL_COOKIES_FILE)
    pub cookies_file: Option<PathBuf>,
    /// Parent of the per-session working directories (TEMP_FILES_DIR)
    pub temp_dir: PathBuf,
    /// Log file (LOG_FILE_PATH)
    pub log_file_path: PathBuf,
    /// Custom Bot API server (BOT_API_URL)
    pub bot_api_url: Option<String>,
    /// Upper bound on concurrent yt-dlp processes (MAX_CONCURRENT_EXTRACTIONS)
    pub max_concurrent_extractions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot_token: None,
            reply_delay: limits::reply_delay(),
            max_upload_bytes: limits::MAX_UPLOAD_BYTES,
            max_caption_chars: limits::MAX_CAPTION_CHARS,
            ytdl_bin: "yt-dlp".to_string(),
            cookies_file: None,
            temp_dir: env::temp_dir(),
            log_file_path: PathBuf::from("reelgrab.log"),
            bot_api_url: None,
            max_concurrent_extractions: extraction::DEFAULT_MAX_CONCURRENT,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    ///
    /// Empty values are treated as unset. The token is optional here; callers
    /// that talk to Telegram must go through [`Settings::require_token`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let max_concurrent_extractions = match get("MAX_CONCURRENT_EXTRACTIONS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "MAX_CONCURRENT_EXTRACTIONS",
                        value: raw,
                    })
                }
            },
            None => defaults.max_concurrent_extractions,
        };

        Ok(Self {
            bot_token: get("BOT_TOKEN").or_else(|| get("TELOXIDE_TOKEN")).map(SecretString::from),
            ytdl_bin: get("YTDL_BIN").unwrap_or(defaults.ytdl_bin),
            cookies_file: get("YTDL_COOKIES_FILE").map(PathBuf::from),
            temp_dir: get("TEMP_FILES_DIR").map(PathBuf::from).unwrap_or(defaults.temp_dir),
            log_file_path: get("LOG_FILE_PATH").map(PathBuf::from).unwrap_or(defaults.log_file_path),
            bot_api_url: get("BOT_API_URL"),
            max_concurrent_extractions,
            ..defaults
        })
    }

    /// Returns the bot token or the fatal startup error.
    pub fn require_token(&self) -> Result<&SecretString, ConfigError> {
        self.bot_token.as_ref().ok_or(ConfigError::MissingToken)
    }
}
