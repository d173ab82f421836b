//! Extraction adapter
//!
//! Wraps the third-party media extractor behind the [`Extractor`] trait. An
//! extraction is a *blocking* call: it downloads into the job's working
//! directory and returns the title and description. Callers run it through
//! [`pool::ExtractionPool`] so it never blocks the async runtime.
//!
//! Built-in backend:
//! - [`ytdlp::YtDlpExtractor`]: spawns the yt-dlp binary

pub mod pool;
pub mod ytdlp;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::limits;

pub use pool::ExtractionPool;
pub use ytdlp::YtDlpExtractor;

/// Title used when the extractor reports none
pub const DEFAULT_TITLE: &str = "video";

/// Extraction failure.
///
/// Extraction errors are not classified further or retried: the message is
/// shown to the user as-is.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The extractor binary could not be started
    #[error("failed to start {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    /// The extractor ran and reported a failure
    #[error("{0}")]
    Failed(String),

    /// The extractor succeeded but its metadata could not be read
    #[error("unreadable metadata: {0}")]
    Metadata(#[from] serde_json::Error),

    /// The worker running the extraction died or the pool was shut down
    #[error("extraction worker failed: {0}")]
    Worker(String),
}

/// Extractor configuration for one job.
///
/// Rendered to command-line flags by [`ExtractOptions::to_args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Output template, always inside the job's working directory
    pub output_template: String,
    /// Format selector
    pub format: String,
    /// Download a single video even if the link points into a playlist
    pub no_playlist: bool,
    /// Suppress progress bars and warnings
    pub quiet: bool,
    /// Optional Netscape cookies file
    pub cookies_file: Option<PathBuf>,
}

impl ExtractOptions {
    /// Default options writing `<title>.<ext>` into `workdir`.
    pub fn for_workdir(workdir: &Path) -> Self {
        Self {
            output_template: workdir.join("%(title)s.%(ext)s").to_string_lossy().into_owned(),
            format: limits::FORMAT_PREFERENCE.to_string(),
            no_playlist: true,
            quiet: true,
            cookies_file: None,
        }
    }

    /// Attach a cookies file.
    pub fn cookies_file(mut self, path: Option<PathBuf>) -> Self {
        self.cookies_file = path;
        self
    }

    /// yt-dlp flags for these options (the URL is not included).
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            self.output_template.clone(),
            "--format".to_string(),
            self.format.clone(),
        ];
        if self.no_playlist {
            args.push("--no-playlist".to_string());
        }
        if self.quiet {
            args.extend(["--no-progress", "--quiet", "--no-warnings"].map(String::from));
        }
        if let Some(cookies) = &self.cookies_file {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().into_owned());
        }
        args
    }
}

/// One download: a classified URL, its private working directory and options.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub url: String,
    pub workdir: PathBuf,
    pub options: ExtractOptions,
}

impl DownloadJob {
    pub fn new(url: impl Into<String>, workdir: &Path, cookies_file: Option<PathBuf>) -> Self {
        Self {
            url: url.into(),
            workdir: workdir.to_path_buf(),
            options: ExtractOptions::for_workdir(workdir).cookies_file(cookies_file),
        }
    }
}

/// Metadata returned by a successful extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct RawInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ExtractionResult {
    /// Parses the extractor's JSON info dict, ignoring every field but
    /// title and description.
    pub fn from_json(json: &str) -> Result<Self, ExtractError> {
        let raw: RawInfo = serde_json::from_str(json)?;
        Ok(Self {
            title: raw
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: raw.description.filter(|d| !d.trim().is_empty()),
        })
    }
}

/// A media extractor.
///
/// `extract` blocks until the download finishes and must only write inside
/// `job.workdir`.
pub trait Extractor: Send + Sync {
    /// Human-readable name (e.g., "yt-dlp")
    fn name(&self) -> &str;

    /// Download `job.url` into `job.workdir` and return its metadata.
    fn extract(&self, job: &DownloadJob) -> Result<ExtractionResult, ExtractError>;
}
