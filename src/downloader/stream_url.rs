use tokio::process::Command;
use tracing::instrument;

use crate::error::error_chain_fmt;

// Only a direct media URL is requested; nothing is written to disk. The
// selector caps playback at 720p/1280-wide, matching what the bot streams.
const FORMAT_SELECTOR: &str = "best[height<=?720][width<=?1280]";

#[derive(thiserror::Error)]
pub enum StreamUrlError {
    #[error("failed to spawn the downloader process")]
    Spawn(#[source] std::io::Error),
    #[error("the downloader produced no stream URL: {stderr}")]
    Failed { stderr: String },
}

impl std::fmt::Debug for StreamUrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Runs the external downloader binary in URL-only mode. Works without
/// cookies, so only publicly accessible videos resolve.
pub struct StreamUrlExtractor {
    bin: String,
}

impl StreamUrlExtractor {
    pub fn new(bin: String) -> Self {
        Self { bin }
    }

    /// First stdout line on success; empty stdout means failure and the
    /// raw stderr text is surfaced as-is.
    #[instrument(name = "Extracting stream URL", skip(self))]
    pub async fn extract(&self, url: &str) -> Result<String, StreamUrlError> {
        let output = Command::new(&self.bin)
            .args([
                "-g",
                "-f",
                FORMAT_SELECTOR,
                "--geo-bypass",
                "--no-check-certificates",
                url,
            ])
            .output()
            .await
            .map_err(StreamUrlError::Spawn)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.lines().next() {
            Some(line) if !line.trim().is_empty() => Ok(line.trim().to_string()),
            _ => Err(StreamUrlError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
        }
    }
}
