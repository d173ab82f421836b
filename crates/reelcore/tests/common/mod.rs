//! Test doubles shared by the integration tests
//!
//! - `FakeExtractor` writes sparse files into the job's working directory
//!   instead of spawning yt-dlp
//! - `RecordingMessenger` keeps every outbound call in order

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reelcore::extract::{DownloadJob, ExtractError, ExtractionPool, ExtractionResult, Extractor};
use reelcore::messenger::{ChatActivity, DeliveryError, Messenger, VideoReply};
use reelcore::{SessionHandler, Settings};

/// What the fake extractor does when called
#[derive(Debug, Clone)]
pub enum FakeOutcome {
    /// Create these `(file name, size)` entries and succeed
    Files {
        files: Vec<(String, u64)>,
        description: Option<String>,
    },
    /// Fail with this message
    Fail(String),
}

pub struct FakeExtractor {
    outcome: FakeOutcome,
    workdirs: Mutex<Vec<PathBuf>>,
}

impl FakeExtractor {
    pub fn new(outcome: FakeOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            workdirs: Mutex::new(Vec::new()),
        })
    }

    pub fn producing(files: &[(&str, u64)], description: Option<&str>) -> Arc<Self> {
        Self::new(FakeOutcome::Files {
            files: files.iter().map(|(n, s)| (n.to_string(), *s)).collect(),
            description: description.map(String::from),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(FakeOutcome::Fail(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.workdirs.lock().unwrap().len()
    }

    pub fn workdirs(&self) -> Vec<PathBuf> {
        self.workdirs.lock().unwrap().clone()
    }
}

impl Extractor for FakeExtractor {
    fn name(&self) -> &str {
        "fake"
    }

    fn extract(&self, job: &DownloadJob) -> Result<ExtractionResult, ExtractError> {
        self.workdirs.lock().unwrap().push(job.workdir.clone());
        match &self.outcome {
            FakeOutcome::Fail(message) => Err(ExtractError::Failed(message.clone())),
            FakeOutcome::Files { files, description } => {
                for (name, size) in files {
                    let file = std::fs::File::create(job.workdir.join(name)).map_err(|e| ExtractError::Spawn {
                        bin: "fake".to_string(),
                        source: e,
                    })?;
                    file.set_len(*size).map_err(|e| ExtractError::Spawn {
                        bin: "fake".to_string(),
                        source: e,
                    })?;
                }
                Ok(ExtractionResult {
                    title: "clip".to_string(),
                    description: description.clone(),
                })
            }
        }
    }
}

/// One outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(i64, String),
    Activity(i64, ChatActivity),
    Video(i64, VideoReply),
}

#[derive(Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Sent>>,
    fail_videos: bool,
}

impl RecordingMessenger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every `send_video` fails with "Request Entity Too Large"
    pub fn rejecting_videos() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_videos: true,
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(_, text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn videos(&self) -> Vec<VideoReply> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Video(_, video) => Some(video),
                _ => None,
            })
            .collect()
    }

    fn record(&self, sent: Sent) {
        self.sent.lock().unwrap().push(sent);
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<(), DeliveryError> {
        self.record(Sent::Text(chat_id, text.to_string()));
        Ok(())
    }

    async fn send_activity(&self, chat_id: i64, activity: ChatActivity) -> Result<(), DeliveryError> {
        self.record(Sent::Activity(chat_id, activity));
        Ok(())
    }

    async fn send_video(&self, chat_id: i64, video: &VideoReply) -> Result<(), DeliveryError> {
        assert!(video.path.exists(), "video must exist while it is being sent");
        if self.fail_videos {
            return Err(DeliveryError::new("Request Entity Too Large"));
        }
        self.record(Sent::Video(chat_id, video.clone()));
        Ok(())
    }
}

/// Settings with no reply delay and working directories under `temp_dir`
pub fn test_settings(temp_dir: &std::path::Path) -> Settings {
    Settings {
        reply_delay: Duration::ZERO,
        temp_dir: temp_dir.to_path_buf(),
        ..Default::default()
    }
}

pub fn handler(settings: Settings, extractor: Arc<FakeExtractor>, messenger: Arc<RecordingMessenger>) -> SessionHandler {
    let workers = settings.max_concurrent_extractions;
    SessionHandler::new(
        Arc::new(settings),
        Arc::new(ExtractionPool::new(extractor, workers)),
        messenger,
    )
}
