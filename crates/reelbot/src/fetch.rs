//! `reelbot fetch`: one download without Telegram
//!
//! Runs the same classification, extraction, selection and gating as a chat
//! session, then copies the selected video out of the temporary working
//! directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use reelcore::config::limits;
use reelcore::extract::{DownloadJob, ExtractionPool, Extractor};
use reelcore::gate::{DeliveryGate, GateOutcome};
use reelcore::output::select_output;
use reelcore::session::SessionError;
use reelcore::validation::{detect_family, UrlFamily};
use reelcore::{AppResult, Settings};

/// What a fetch produced
#[derive(Debug)]
pub struct FetchOutcome {
    pub family: UrlFamily,
    pub title: String,
    /// Copy of the selected video in the output directory
    pub destination: PathBuf,
    pub size: u64,
    pub caption: Option<String>,
}

/// Downloads `url` with `extractor` and copies the video into `output_dir`.
pub async fn fetch_to_dir(
    settings: &Settings,
    extractor: Arc<dyn Extractor>,
    url: &str,
    output_dir: &Path,
) -> AppResult<FetchOutcome> {
    let url = url.trim();
    let family = detect_family(url).ok_or(SessionError::UnsupportedUrl)?;

    let workdir = tempfile::Builder::new()
        .prefix(limits::WORKDIR_PREFIX)
        .tempdir_in(&settings.temp_dir)?;
    let pool = ExtractionPool::new(extractor, 1);
    let job = DownloadJob::new(url, workdir.path(), settings.cookies_file.clone());
    let info = pool.run(job).await?;

    let file = select_output(workdir.path())?.ok_or(SessionError::NoOutput)?;
    let caption = match DeliveryGate::from_settings(settings).check(&file, info.description.as_deref()) {
        GateOutcome::Accepted { caption } => caption,
        GateOutcome::TooLarge { size, limit } => return Err(SessionError::TooLarge { size, limit }.into()),
    };

    let file_name = file.path.file_name().ok_or(SessionError::NoOutput)?;
    fs_err::create_dir_all(output_dir)?;
    let destination = output_dir.join(file_name);
    fs_err::copy(&file.path, &destination)?;
    log::info!("Fetched {} into {}", url, destination.display());

    Ok(FetchOutcome {
        family,
        title: info.title,
        destination,
        size: file.size,
        caption,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use reelcore::extract::{ExtractError, ExtractionResult};
    use reelcore::AppError;
    use std::time::Duration;

    struct StaticExtractor {
        file: Option<(&'static str, u64)>,
        description: Option<&'static str>,
    }

    impl Extractor for StaticExtractor {
        fn name(&self) -> &str {
            "static"
        }

        fn extract(&self, job: &DownloadJob) -> Result<ExtractionResult, ExtractError> {
            let (name, size) = self
                .file
                .ok_or_else(|| ExtractError::Failed("ERROR: Private video".to_string()))?;
            std::fs::File::create(job.workdir.join(name))
                .and_then(|f| f.set_len(size))
                .map_err(|source| ExtractError::Spawn {
                    bin: "static".to_string(),
                    source,
                })?;
            Ok(ExtractionResult {
                title: "clip".to_string(),
                description: self.description.map(String::from),
            })
        }
    }

    fn settings(temp_dir: &Path) -> Settings {
        Settings {
            reply_delay: Duration::ZERO,
            temp_dir: temp_dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_copies_selected_video() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let extractor = Arc::new(StaticExtractor {
            file: Some(("clip.mp4", 64)),
            description: Some("hello"),
        });

        let outcome = fetch_to_dir(&settings(tmp.path()), extractor, " https://youtu.be/abc ", out.path())
            .await
            .unwrap();

        assert_eq!(outcome.family, UrlFamily::YouTube);
        assert_eq!(outcome.destination, out.path().join("clip.mp4"));
        assert_eq!(outcome.size, 64);
        assert_eq!(outcome.caption.as_deref(), Some("hello"));
        assert!(outcome.destination.exists());
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_rejects_unsupported_url() {
        let tmp = tempfile::tempdir().unwrap();
        let extractor = Arc::new(StaticExtractor {
            file: Some(("clip.mp4", 1)),
            description: None,
        });

        let err = fetch_to_dir(&settings(tmp.path()), extractor, "hello world", tmp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Session(SessionError::UnsupportedUrl)));
    }

    #[tokio::test]
    async fn test_fetch_surfaces_extraction_error() {
        let tmp = tempfile::tempdir().unwrap();
        let extractor = Arc::new(StaticExtractor {
            file: None,
            description: None,
        });

        let err = fetch_to_dir(&settings(tmp.path()), extractor, "https://youtu.be/abc", tmp.path())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extract(ExtractError::Failed(_))));
        assert_eq!(err.to_string(), "Extraction error: ERROR: Private video");
    }

    #[tokio::test]
    async fn test_fetch_refuses_oversized_video() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let extractor = Arc::new(StaticExtractor {
            file: Some(("big.mkv", 101)),
            description: None,
        });
        let settings = Settings {
            max_upload_bytes: 100,
            ..settings(tmp.path())
        };

        let err = fetch_to_dir(&settings, extractor, "https://www.instagram.com/reel/x/", out.path())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Session(SessionError::TooLarge { size: 101, limit: 100 })
        ));
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
