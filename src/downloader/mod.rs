mod download;
mod stream_url;

pub use download::{DownloadError, DownloadKind, Downloader};
pub use stream_url::{StreamUrlError, StreamUrlExtractor};
