use core::fmt;

/// A playlist identifier, taken from the `list=` query value of a playlist
/// URL or verbatim when the input carries no `list=` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistId(String);

impl PlaylistId {
    pub fn extract(link: &str) -> Self {
        match link.split_once("list=") {
            Some((_, rest)) => {
                let id = rest.split('&').next().unwrap_or(rest);
                Self(id.to_string())
            }
            None => Self(link.to_string()),
        }
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for PlaylistId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
