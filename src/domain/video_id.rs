use core::fmt;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").unwrap());

// The id follows either a `v=` query key or a path separator; this covers
// watch, youtu.be, embed, shorts and /v/ URL shapes with one capture.
static URL_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").unwrap());

/// The 11-character identifier YouTube assigns to a video.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn parse(s: String) -> Result<Self, String> {
        if ID_PATTERN.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(format!("Failed to parse video id: '{}'", s))
        }
    }

    /// Recovers the id from the common YouTube URL shapes. `None` when the
    /// string carries no recognisable id; callers may still pass the raw
    /// input through to a lookup, which then reports zero items.
    pub fn extract(url: &str) -> Option<Self> {
        URL_ID_PATTERN
            .captures(url)
            .map(|captures| Self(captures[1].to_string()))
    }

    /// Canonical `watch?v=` URL for this id.
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_BASE, self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
