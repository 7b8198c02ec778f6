//! YouTube lookup, playlist expansion and stream/download helpers for a
//! Telegram music bot.
//!
//! Metadata comes from the hosted Data API, stream URLs from an external
//! `yt-dlp` process and full downloads from `rusty_ytdl`. The adapter is
//! stateless: every call is an independent request/response, the only side
//! effect is the downloads directory.

pub mod configuration;
pub mod domain;
pub mod downloader;
pub mod error;
pub mod telegram;
pub mod telemetry;
pub mod youtube;

pub use domain::{PlaylistId, TrackDuration, VideoId};
pub use downloader::{DownloadError, DownloadKind, StreamUrlError};
pub use youtube::{Track, VideoDetails, YouTube, YoutubeError};
