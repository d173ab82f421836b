//! Bounded worker pool for blocking extractions
//!
//! Each extraction holds a semaphore permit for as long as its blocking task
//! runs, so no more than `max_concurrent` yt-dlp processes exist at once no
//! matter how many chats are waiting. Jobs beyond the bound wait for a permit.

use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::extract::{DownloadJob, ExtractError, ExtractionResult, Extractor};

pub struct ExtractionPool {
    extractor: Arc<dyn Extractor>,
    permits: Arc<Semaphore>,
    max_concurrent: usize,
}

impl ExtractionPool {
    /// `max_concurrent` is clamped to at least one worker.
    pub fn new(extractor: Arc<dyn Extractor>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            extractor,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    pub fn extractor_name(&self) -> &str {
        self.extractor.name()
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Runs `job` on the blocking thread pool once a permit is free.
    pub async fn run(&self, job: DownloadJob) -> Result<ExtractionResult, ExtractError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| ExtractError::Worker(e.to_string()))?;
        log::debug!(
            "Extraction started for {} (permits available: {})",
            job.url,
            self.permits.available_permits()
        );

        let extractor = Arc::clone(&self.extractor);
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            extractor.extract(&job)
        })
        .await
        .map_err(|e| ExtractError::Worker(e.to_string()))?
    }
}
