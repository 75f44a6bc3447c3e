//! Media classification
//!
//! Maps a URL to the kind of media it most likely points at. Pure string
//! matching; nothing is fetched or decoded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Substrings that mark a URL as an animated GIF (checked first)
const GIF_MARKERS: &[&str] = &[".gif", "tenor.com", "giphy.com"];

/// Still-image extensions, matched anywhere in the URL
const IMAGE_MARKERS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

/// What kind of media a favorite refers to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Gif,
    Image,
    #[default]
    #[serde(other)]
    Unknown,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Gif => "gif",
            MediaType::Image => "image",
            MediaType::Unknown => "unknown",
        }
    }

    /// Lenient, case-insensitive parse. Unrecognised input is `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "gif" => MediaType::Gif,
            "image" => MediaType::Image,
            _ => MediaType::Unknown,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a URL by substring.
///
/// GIF markers win over image extensions, so a tenor link to a `.png`
/// preview is still a GIF. Extensions are not anchored to the end of the
/// URL: `photo.jpg?size=large` and `/x.png/raw` both count as images.
pub fn classify(url: &str) -> MediaType {
    let lower = url.to_lowercase();

    if GIF_MARKERS.iter().any(|m| lower.contains(m)) {
        MediaType::Gif
    } else if IMAGE_MARKERS.iter().any(|m| lower.contains(m)) {
        MediaType::Image
    } else {
        MediaType::Unknown
    }
}
