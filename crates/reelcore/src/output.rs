//! Output selection
//!
//! After an extraction the working directory may hold the video plus
//! thumbnails, subtitles or leftover fragments. The selected output is the
//! largest regular file with a recognized video extension.

use std::cmp::Reverse;
use std::path::{Path, PathBuf};

use crate::config::limits::VIDEO_EXTENSIONS;

/// The file chosen for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Whether `path` has one of the recognized video extensions (case-insensitive).
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Picks the largest recognized video among the immediate entries of `dir`.
///
/// Not recursive. Ties on size are broken by file name, ascending, so the
/// result only depends on directory contents. `Ok(None)` means nothing
/// recognizable was produced (typically private or unavailable content).
pub fn select_output(dir: &Path) -> std::io::Result<Option<SelectedFile>> {
    let mut candidates = Vec::new();

    for entry in fs_err::read_dir(dir)? {
        let path = entry?.path();
        if !is_video_file(&path) {
            continue;
        }
        let metadata = fs_err::metadata(&path)?;
        if metadata.is_file() {
            candidates.push(SelectedFile {
                path,
                size: metadata.len(),
            });
        }
    }

    Ok(candidates
        .into_iter()
        .min_by_key(|file| (Reverse(file.size), file.path.file_name().map(|n| n.to_os_string()))))
}
