use rusty_ytdl::{Video, VideoError, VideoOptions, VideoQuality, VideoSearchOptions};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument};

use crate::domain::VideoId;
use crate::error::error_chain_fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    Audio,
    Video,
}

impl DownloadKind {
    fn extension(self) -> &'static str {
        match self {
            DownloadKind::Audio => "webm",
            DownloadKind::Video => "mp4",
        }
    }

    fn options(self) -> VideoOptions {
        match self {
            DownloadKind::Audio => VideoOptions {
                quality: VideoQuality::Highest,
                filter: VideoSearchOptions::Audio,
                ..Default::default()
            },
            // Muxed audio+video formats, which YouTube serves at 720p or
            // below.
            DownloadKind::Video => VideoOptions {
                quality: VideoQuality::Highest,
                filter: VideoSearchOptions::VideoAudio,
                ..Default::default()
            },
        }
    }
}

#[derive(thiserror::Error)]
pub enum DownloadError {
    #[error("not a recognisable video link or id: '{0}'")]
    InvalidLink(String),
    #[error("fetching the video failed")]
    Fetch(#[from] VideoError),
    #[error("writing the downloaded file failed")]
    Io(#[from] std::io::Error),
}

impl std::fmt::Debug for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// In-process downloads, idempotent by path: a file that is already on
/// disk is returned without touching the network.
pub struct Downloader {
    directory: PathBuf,
}

impl Downloader {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    #[instrument(name = "Downloading media", skip(self))]
    pub async fn download(
        &self,
        id: &VideoId,
        kind: DownloadKind,
    ) -> Result<PathBuf, DownloadError> {
        let target = self.directory.join(format!("{}.{}", id, kind.extension()));
        if fs::try_exists(&target).await? {
            debug!("already on disk: {}", target.display());
            return Ok(target);
        }
        fs::create_dir_all(&self.directory).await?;

        let video = Video::new_with_options(id.as_ref(), kind.options())?;
        let stream = video.stream().await?;

        // Written under a .part name so an interrupted transfer never
        // satisfies the presence check above.
        let staging = target.with_extension(format!("{}.part", kind.extension()));
        let mut file = fs::File::create(&staging).await?;
        let mut written = 0usize;
        while let Some(chunk) = stream.chunk().await? {
            written += chunk.len();
            file.write_all(&chunk).await?;
            debug!("downloaded {} bytes so far", written);
        }
        file.flush().await?;
        drop(file);
        fs::rename(&staging, &target).await?;

        info!("downloaded {} to {}", id, target.display());
        Ok(target)
    }
}
