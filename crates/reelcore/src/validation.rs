//! URL classification
//!
//! Decides whether a chat message is a link we know how to download. Two
//! families are recognized:
//! - YouTube: `youtube.com/watch?v=...` or `youtu.be/...`
//! - Instagram: `instagram.com/...`
//!
//! Matching is case-insensitive, anchored at the start, and allows an
//! optional `http(s)://` scheme and `www.` prefix. No network access.

use lazy_regex::{lazy_regex, Lazy, Regex};
use strum::Display;

static YOUTUBE_RE: Lazy<Regex> = lazy_regex!(r"^(https?://)?(www\.)?(youtube\.com/watch\?v=|youtu\.be/)\S+$"i);
static INSTAGRAM_RE: Lazy<Regex> = lazy_regex!(r"^(https?://)?(www\.)?instagram\.com/\S+$"i);

/// Recognized link families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum UrlFamily {
    YouTube,
    Instagram,
}

/// Returns the family of `text`, or `None` if it is not a supported link.
///
/// Surrounding whitespace is ignored; whitespace inside the text (several
/// links, a link plus a comment) makes it unsupported.
///
/// # Examples
/// ```
/// use reelcore::validation::{detect_family, UrlFamily};
///
/// assert_eq!(detect_family("https://youtu.be/abc123"), Some(UrlFamily::YouTube));
/// assert_eq!(detect_family("instagram.com/reel/xyz"), Some(UrlFamily::Instagram));
/// assert_eq!(detect_family("https://youtube.com/shorts/xyz"), None);
/// ```
pub fn detect_family(text: &str) -> Option<UrlFamily> {
    let text = text.trim();
    if YOUTUBE_RE.is_match(text) {
        Some(UrlFamily::YouTube)
    } else if INSTAGRAM_RE.is_match(text) {
        Some(UrlFamily::Instagram)
    } else {
        None
    }
}

/// Whether `text` is a link the bot accepts.
pub fn is_supported_url(text: &str) -> bool {
    detect_family(text).is_some()
}
