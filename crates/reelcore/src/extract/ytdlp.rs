//! yt-dlp backed extractor
//!
//! yt-dlp is run with `--no-simulate --dump-single-json`, so one invocation
//! both downloads the media and prints the info dict we read title and
//! description from.

use std::process::{Command, ExitStatus, Stdio};

use crate::config::Settings;
use crate::extract::{DownloadJob, ExtractError, ExtractionResult, Extractor};

/// Extractor backed by the yt-dlp command-line tool.
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    bin: String,
}

impl Default for YtDlpExtractor {
    fn default() -> Self {
        Self::new("yt-dlp")
    }
}

impl YtDlpExtractor {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.ytdl_bin.clone())
    }

    /// Full argument list for `job`.
    pub fn build_args(job: &DownloadJob) -> Vec<String> {
        let mut args = job.options.to_args();
        args.extend(["--no-simulate", "--dump-single-json", "--"].map(String::from));
        args.push(job.url.clone());
        args
    }
}

impl Extractor for YtDlpExtractor {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    fn extract(&self, job: &DownloadJob) -> Result<ExtractionResult, ExtractError> {
        let args = Self::build_args(job);
        log::debug!("Running {} {}", self.bin, args.join(" "));

        let output = Command::new(&self.bin)
            .args(&args)
            .current_dir(&job.workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ExtractError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Failed(failure_message(&stderr, output.status)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json = stdout
            .lines()
            .rev()
            .map(str::trim)
            .find(|line| line.starts_with('{'))
            .ok_or_else(|| ExtractError::Failed(format!("{} printed no metadata", self.bin)))?;

        ExtractionResult::from_json(json)
    }
}

/// Picks the line of stderr worth showing to a user.
///
/// yt-dlp prefixes fatal problems with `ERROR:`; the last such line wins.
/// Falls back to the last non-empty line, then to the exit status.
pub fn failure_message(stderr: &str, status: ExitStatus) -> String {
    let lines = || stderr.lines().map(str::trim).filter(|l| !l.is_empty());
    lines()
        .filter(|l| l.starts_with("ERROR:"))
        .last()
        .or_else(|| lines().last())
        .map(str::to_string)
        .unwrap_or_else(|| format!("yt-dlp exited with {}", status))
}
