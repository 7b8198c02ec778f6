mod client;
pub mod types;

pub use client::DataApiClient;

use regex::Regex;
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::{info, instrument, warn};

use crate::configuration::Settings;
use crate::domain::{PlaylistId, TrackDuration, VideoId};
use crate::downloader::{
    DownloadError, DownloadKind, Downloader, StreamUrlError, StreamUrlExtractor,
};
use crate::error::error_chain_fmt;
use types::VideoItem;

static HOST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:youtube\.com|youtu\.be)").unwrap());

#[derive(thiserror::Error)]
pub enum YoutubeError {
    #[error("request to the Data API failed")]
    Request(#[from] reqwest::Error),
    #[error("Data API error ({status}): {message}")]
    Api {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for YoutubeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Per-request video metadata, straight from a `videos.list` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDetails {
    pub title: String,
    pub duration: TrackDuration,
    pub thumbnail_url: String,
    pub id: VideoId,
}

/// What the bot presents in queue listings: `VideoDetails` plus the
/// canonical watch link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub link: String,
    pub video_id: VideoId,
    pub duration: TrackDuration,
    pub thumbnail_url: String,
}

impl From<VideoDetails> for Track {
    fn from(details: VideoDetails) -> Self {
        Self {
            link: details.id.watch_url(),
            title: details.title,
            duration: details.duration,
            thumbnail_url: details.thumbnail_url,
            video_id: details.id,
        }
    }
}

impl TryFrom<VideoItem> for VideoDetails {
    type Error = YoutubeError;

    fn try_from(item: VideoItem) -> Result<Self, Self::Error> {
        let VideoItem {
            id,
            snippet,
            content_details,
        } = item;
        let id = VideoId::parse(id).map_err(|e| YoutubeError::UnexpectedError(anyhow::anyhow!(e)))?;
        let duration = TrackDuration::parse_iso8601(&content_details.duration)
            .map_err(|e| YoutubeError::UnexpectedError(anyhow::anyhow!(e)))?;
        let thumbnail_url = snippet
            .thumbnails
            .high
            .or(snippet.thumbnails.default)
            .map(|thumbnail| thumbnail.url)
            .ok_or_else(|| {
                YoutubeError::UnexpectedError(anyhow::anyhow!(
                    "video '{}' exposes no thumbnails",
                    id
                ))
            })?;
        Ok(Self {
            title: snippet.title,
            duration,
            thumbnail_url,
            id,
        })
    }
}

/// The adapter facade. Stateless: every method is an independent
/// request/response against the Data API, the downloader binary or the
/// download library.
pub struct YouTube {
    api: DataApiClient,
    downloader: Downloader,
    stream_extractor: StreamUrlExtractor,
}

impl YouTube {
    /// `search.list` window; disambiguation indexes into these positions.
    const SEARCH_WINDOW: u8 = 10;
    /// Hard page-size ceiling of `playlistItems.list`.
    const MAX_PAGE_SIZE: u8 = 50;

    pub fn new(settings: Settings) -> Result<Self, reqwest::Error> {
        let Settings {
            youtube_cfg,
            downloader_cfg,
        } = settings;
        Ok(Self {
            api: DataApiClient::try_from(youtube_cfg)?,
            downloader: Downloader::new(downloader_cfg.directory),
            stream_extractor: StreamUrlExtractor::new(downloader_cfg.ytdlp_bin),
        })
    }

    /// True when the string points at YouTube. An id is expanded to its
    /// canonical watch URL first, so it always qualifies.
    pub fn is_youtube_link(link: &str, is_video_id: bool) -> bool {
        HOST_PATTERN.is_match(&Self::canonical_url(link, is_video_id))
    }

    /// One `videos.list` lookup. `Ok(None)` means the API answered and had
    /// no matching video; `Err` means the call itself failed.
    #[instrument(name = "Fetching video details", skip(self))]
    pub async fn details(
        &self,
        link: &str,
        is_video_id: bool,
    ) -> Result<Option<VideoDetails>, YoutubeError> {
        let key = Self::resolve_key(link, is_video_id);
        let response = self.api.videos_list(&key).await?;
        let Some(item) = response.items.into_iter().next() else {
            info!("no video matched '{}'", key);
            return Ok(None);
        };
        VideoDetails::try_from(item).map(Some)
    }

    pub async fn title(
        &self,
        link: &str,
        is_video_id: bool,
    ) -> Result<Option<String>, YoutubeError> {
        Ok(self
            .details(link, is_video_id)
            .await?
            .map(|details| details.title))
    }

    pub async fn duration(
        &self,
        link: &str,
        is_video_id: bool,
    ) -> Result<Option<TrackDuration>, YoutubeError> {
        Ok(self
            .details(link, is_video_id)
            .await?
            .map(|details| details.duration))
    }

    pub async fn thumbnail(
        &self,
        link: &str,
        is_video_id: bool,
    ) -> Result<Option<String>, YoutubeError> {
        Ok(self
            .details(link, is_video_id)
            .await?
            .map(|details| details.thumbnail_url))
    }

    pub async fn track(
        &self,
        link: &str,
        is_video_id: bool,
    ) -> Result<Option<Track>, YoutubeError> {
        Ok(self.details(link, is_video_id).await?.map(Track::from))
    }

    /// Positional disambiguation over a fixed search window. The search
    /// response omits durations, so a hit costs a second lookup.
    #[instrument(name = "Searching videos", skip(self))]
    pub async fn slider(
        &self,
        query: &str,
        result_index: usize,
    ) -> Result<Option<VideoDetails>, YoutubeError> {
        let response = self.api.search_list(query, Self::SEARCH_WINDOW).await?;
        let Some(item) = response.items.into_iter().nth(result_index) else {
            info!("search window holds no result at index {}", result_index);
            return Ok(None);
        };
        let Some(video_id) = item.id.video_id else {
            return Ok(None);
        };
        self.details(&video_id, true).await
    }

    /// Expands a playlist into at most `limit` video ids, following
    /// continuation tokens. `Ok(vec![])` is a genuinely empty playlist;
    /// API failures surface as `Err`.
    #[instrument(name = "Expanding playlist", skip(self))]
    pub async fn playlist(
        &self,
        link_or_id: &str,
        limit: usize,
    ) -> Result<Vec<VideoId>, YoutubeError> {
        let playlist_id = PlaylistId::extract(link_or_id);
        let mut collected = Vec::new();
        let mut page_token: Option<String> = None;

        while collected.len() < limit {
            let page_size = (limit - collected.len()).min(usize::from(Self::MAX_PAGE_SIZE)) as u8;
            let page = self
                .api
                .playlist_items(playlist_id.as_ref(), page_size, page_token.as_deref())
                .await?;

            for item in page.items {
                match VideoId::parse(item.content_details.video_id) {
                    Ok(id) => collected.push(id),
                    Err(error) => warn!("skipping malformed playlist entry: {}", error),
                }
            }

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        collected.truncate(limit);
        Ok(collected)
    }

    /// Direct media URL via the external downloader, public videos only.
    pub async fn stream_url(
        &self,
        link: &str,
        is_video_id: bool,
    ) -> Result<String, StreamUrlError> {
        self.stream_extractor
            .extract(&Self::canonical_url(link, is_video_id))
            .await
    }

    /// Fetches the media file itself, keyed by the video's native id.
    /// Repeated calls for the same id return the existing file.
    pub async fn download(
        &self,
        link: &str,
        is_video_id: bool,
        kind: DownloadKind,
    ) -> Result<PathBuf, DownloadError> {
        let id = if is_video_id {
            VideoId::parse(link.to_string())
                .map_err(|_| DownloadError::InvalidLink(link.to_string()))?
        } else {
            VideoId::extract(link)
                .or_else(|| VideoId::parse(link.to_string()).ok())
                .ok_or_else(|| DownloadError::InvalidLink(link.to_string()))?
        };
        self.downloader.download(&id, kind).await
    }

    fn canonical_url(link: &str, is_video_id: bool) -> Cow<'_, str> {
        if is_video_id {
            Cow::Owned(format!("{}{}", crate::domain::WATCH_URL_BASE, link))
        } else {
            Cow::Borrowed(link)
        }
    }

    fn resolve_key(link: &str, is_video_id: bool) -> Cow<'_, str> {
        if is_video_id {
            Cow::Borrowed(link)
        } else {
            match VideoId::extract(link) {
                Some(id) => Cow::Owned(id.to_string()),
                // Tolerated: the lookup then reports zero items.
                None => Cow::Borrowed(link),
            }
        }
    }
}
