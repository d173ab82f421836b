//! Outbound chat seam
//!
//! The session handler only needs three things from the messaging platform:
//! send text, show a chat action, send a video. The Telegram implementation
//! lives in the bot crate; tests use a recording fake.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Chat action shown while the bot is busy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatActivity {
    Typing,
    UploadVideo,
}

/// A video reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReply {
    pub path: PathBuf,
    pub caption: Option<String>,
    /// Ask the client to allow playback before the download completes
    pub supports_streaming: bool,
}

/// Failure reported by the messaging platform
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct DeliveryError(pub String);

impl DeliveryError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError>;

    async fn send_activity(&self, chat_id: i64, activity: ChatActivity) -> Result<(), DeliveryError>;

    async fn send_video(&self, chat_id: i64, video: &VideoReply) -> Result<(), DeliveryError>;
}
