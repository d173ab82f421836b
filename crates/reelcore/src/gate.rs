//! Delivery gate: upload size limit and caption shaping

use crate::config::{limits, Settings};
use crate::output::SelectedFile;

/// Stand-in for "no caption"
pub const CAPTION_PLACEHOLDER: &str = "—";

/// Result of checking a file against the upload policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Upload may proceed with this caption
    Accepted { caption: Option<String> },
    /// File is over the limit; nothing is uploaded
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Clone, Copy)]
pub struct DeliveryGate {
    max_bytes: u64,
    max_caption_chars: usize,
}

impl Default for DeliveryGate {
    fn default() -> Self {
        Self::new(limits::MAX_UPLOAD_BYTES, limits::MAX_CAPTION_CHARS)
    }
}

impl DeliveryGate {
    pub fn new(max_bytes: u64, max_caption_chars: usize) -> Self {
        Self {
            max_bytes,
            max_caption_chars,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.max_upload_bytes, settings.max_caption_chars)
    }

    /// Sizes up to and including the limit are accepted.
    pub fn check(&self, file: &SelectedFile, description: Option<&str>) -> GateOutcome {
        if file.size > self.max_bytes {
            return GateOutcome::TooLarge {
                size: file.size,
                limit: self.max_bytes,
            };
        }
        GateOutcome::Accepted {
            caption: self.caption(description),
        }
    }

    /// Caption for an extracted description.
    ///
    /// Missing or blank descriptions become the placeholder, and the
    /// placeholder means no caption at all. Anything else is cut to the
    /// caption limit, counted in characters rather than bytes.
    pub fn caption(&self, description: Option<&str>) -> Option<String> {
        let text = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(CAPTION_PLACEHOLDER);
        if text == CAPTION_PLACEHOLDER {
            return None;
        }
        Some(text.chars().take(self.max_caption_chars).collect())
    }
}
