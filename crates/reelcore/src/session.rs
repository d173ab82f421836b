//! Session handler: one inbound message from validation to delivery
//!
//! ```text
//! Received → Validated → Acknowledged → Waiting → Downloading
//!          → Selecting → Gating → Uploading → Done
//! ```
//!
//! `Errored` is reachable from Validated, Downloading, Selecting, Gating and
//! Uploading. Every error path sends exactly one text reply and ends the
//! session; nothing is retried. The working directory is a [`tempfile::TempDir`] owned
//! by the running session, so it is removed on every exit path.

use std::sync::Arc;
use strum::Display;
use thiserror::Error;

use crate::config::{limits, Settings};
use crate::extract::{DownloadJob, ExtractError, ExtractionPool};
use crate::gate::{DeliveryGate, GateOutcome};
use crate::messenger::{ChatActivity, DeliveryError, Messenger, VideoReply};
use crate::output::select_output;
use crate::validation::detect_family;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionState {
    Received,
    Validated,
    Acknowledged,
    Waiting,
    Downloading,
    Selecting,
    Gating,
    Uploading,
    Done,
    Errored,
}

/// Why a session ended early
#[derive(Debug, Error)]
pub enum SessionError {
    /// Message is not a supported link
    #[error("unsupported URL")]
    UnsupportedUrl,

    /// yt-dlp failed
    #[error("download failed: {0}")]
    Extraction(#[from] ExtractError),

    /// Download finished but produced no recognized video file
    #[error("no video file was produced")]
    NoOutput,

    /// Video is over the upload limit
    #[error("video is {size} bytes, over the {limit} byte upload limit")]
    TooLarge { size: u64, limit: u64 },

    /// Sending the video failed
    #[error("upload failed: {0}")]
    Upload(#[source] DeliveryError),

    /// Working directory could not be created or read
    #[error("working directory error: {0}")]
    Workspace(#[from] std::io::Error),
}

impl SessionError {
    /// Short category name for logs
    pub fn kind(&self) -> &'static str {
        match self {
            SessionError::UnsupportedUrl => "unsupported_url",
            SessionError::Extraction(_) => "extraction",
            SessionError::NoOutput => "no_output",
            SessionError::TooLarge { .. } => "too_large",
            SessionError::Upload(_) => "upload",
            SessionError::Workspace(_) => "workspace",
        }
    }

    /// Text sent back to the chat
    pub fn user_message(&self) -> String {
        match self {
            SessionError::UnsupportedUrl => messages::UNSUPPORTED.to_string(),
            SessionError::Extraction(e) => format!("Download failed: {}", e),
            SessionError::Workspace(e) => format!("Download failed: {}", e),
            SessionError::NoOutput => messages::NOT_FOUND.to_string(),
            SessionError::TooLarge { .. } => messages::TOO_LARGE.to_string(),
            SessionError::Upload(e) => format!("Failed to send the video: {}", e),
        }
    }
}

/// User-facing texts
pub mod messages {
    pub const UNSUPPORTED: &str = "I only accept YouTube and Instagram links.";
    pub const NOT_FOUND: &str = "Video not found. The link may be private.";
    pub const TOO_LARGE: &str = "The video is larger than Telegram's upload limit.";

    pub fn greeting(delay_secs: u64) -> String {
        format!(
            "Hi 👋\nSend me an Instagram or YouTube link. The video and its caption arrive {} seconds later.",
            delay_secs
        )
    }

    pub fn acknowledged(delay_secs: u64) -> String {
        format!("OK! Wait {} seconds…", delay_secs)
    }
}

/// How a session ended
#[derive(Debug)]
pub struct SessionReport {
    pub chat_id: i64,
    /// `Done` or `Errored`
    pub state: SessionState,
    /// Last state reached before the error
    pub failed_at: Option<SessionState>,
    pub error: Option<SessionError>,
}

impl SessionReport {
    pub fn is_done(&self) -> bool {
        self.state == SessionState::Done
    }
}

struct Progress {
    chat_id: i64,
    state: SessionState,
}

impl Progress {
    fn advance(&mut self, next: SessionState) {
        log::debug!("chat {}: {} → {}", self.chat_id, self.state, next);
        self.state = next;
    }
}

/// Handles one message at a time; shared across all concurrent sessions.
pub struct SessionHandler {
    settings: Arc<Settings>,
    pool: Arc<ExtractionPool>,
    messenger: Arc<dyn Messenger>,
    gate: DeliveryGate,
}

impl SessionHandler {
    pub fn new(settings: Arc<Settings>, pool: Arc<ExtractionPool>, messenger: Arc<dyn Messenger>) -> Self {
        let gate = DeliveryGate::from_settings(&settings);
        Self {
            settings,
            pool,
            messenger,
            gate,
        }
    }

    /// Reply to `/start`.
    pub async fn greet(&self, chat_id: i64) -> Result<(), DeliveryError> {
        let text = messages::greeting(self.settings.reply_delay.as_secs());
        self.messenger.send_text(chat_id, &text).await
    }

    /// Runs a full session for `text` received in `chat_id`.
    pub async fn handle(&self, chat_id: i64, text: &str) -> SessionReport {
        let mut progress = Progress {
            chat_id,
            state: SessionState::Received,
        };

        match self.run(&mut progress, chat_id, text).await {
            Ok(()) => {
                progress.advance(SessionState::Done);
                log::info!("chat {}: video delivered", chat_id);
                SessionReport {
                    chat_id,
                    state: SessionState::Done,
                    failed_at: None,
                    error: None,
                }
            }
            Err(err) => {
                let failed_at = progress.state;
                log::warn!("chat {}: session failed at {} ({}): {}", chat_id, failed_at, err.kind(), err);
                if let Err(e) = self.messenger.send_text(chat_id, &err.user_message()).await {
                    log::error!("chat {}: failed to report error: {}", chat_id, e);
                }
                progress.advance(SessionState::Errored);
                SessionReport {
                    chat_id,
                    state: SessionState::Errored,
                    failed_at: Some(failed_at),
                    error: Some(err),
                }
            }
        }
    }

    async fn run(&self, progress: &mut Progress, chat_id: i64, text: &str) -> Result<(), SessionError> {
        let url = text.trim();
        progress.advance(SessionState::Validated);
        let family = detect_family(url).ok_or(SessionError::UnsupportedUrl)?;
        log::info!("chat {}: accepted {} link {}", chat_id, family, url);

        let delay = self.settings.reply_delay;
        if let Err(e) = self
            .messenger
            .send_text(chat_id, &messages::acknowledged(delay.as_secs()))
            .await
        {
            log::warn!("chat {}: failed to acknowledge: {}", chat_id, e);
        }
        progress.advance(SessionState::Acknowledged);

        progress.advance(SessionState::Waiting);
        tokio::time::sleep(delay).await;

        progress.advance(SessionState::Downloading);
        let workdir = tempfile::Builder::new()
            .prefix(limits::WORKDIR_PREFIX)
            .tempdir_in(&self.settings.temp_dir)?;
        self.notify(chat_id, ChatActivity::Typing).await;
        let job = DownloadJob::new(url, workdir.path(), self.settings.cookies_file.clone());
        let info = self.pool.run(job).await?;
        log::info!("chat {}: downloaded \"{}\"", chat_id, info.title);

        progress.advance(SessionState::Selecting);
        let file = select_output(workdir.path())?.ok_or(SessionError::NoOutput)?;

        progress.advance(SessionState::Gating);
        let caption = match self.gate.check(&file, info.description.as_deref()) {
            GateOutcome::Accepted { caption } => caption,
            GateOutcome::TooLarge { size, limit } => return Err(SessionError::TooLarge { size, limit }),
        };

        progress.advance(SessionState::Uploading);
        self.notify(chat_id, ChatActivity::UploadVideo).await;
        let reply = VideoReply {
            path: file.path,
            caption,
            supports_streaming: true,
        };
        self.messenger
            .send_video(chat_id, &reply)
            .await
            .map_err(SessionError::Upload)
    }

    async fn notify(&self, chat_id: i64, activity: ChatActivity) {
        if let Err(e) = self.messenger.send_activity(chat_id, activity).await {
            log::debug!("chat {}: chat action {:?} failed: {}", chat_id, activity, e);
        }
    }
}
