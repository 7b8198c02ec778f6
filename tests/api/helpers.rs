use reqwest::Url;
use secrecy::SecretString;
use serde_json::json;
use std::sync::LazyLock;
use std::time::Duration;
use wiremock::MockServer;

use youtube_bridge::configuration::{DownloaderSettings, Settings, YoutubeApiSettings};
use youtube_bridge::telemetry::init_subscriber;
use youtube_bridge::youtube::YouTube;

static TRACING: LazyLock<()> = LazyLock::new(init_subscriber);

pub struct TestAdapter {
    pub api_server: MockServer,
    pub youtube: YouTube,
}

impl TestAdapter {
    /// Builds an adapter whose Data API base URL points at a mock server.
    pub async fn spawn() -> TestAdapter {
        LazyLock::force(&TRACING);
        let api_server = MockServer::start().await;

        let settings = Settings {
            youtube_cfg: YoutubeApiSettings {
                base_url: Url::parse(&api_server.uri()).unwrap(),
                api_key: SecretString::from("api-key-test"),
                timeout_ms: Duration::from_millis(2_000),
            },
            downloader_cfg: DownloaderSettings {
                directory: "downloads".into(),
                ytdlp_bin: "yt-dlp".into(),
            },
        };
        let youtube = YouTube::new(settings).expect("Failed to build the adapter.");

        TestAdapter {
            api_server,
            youtube,
        }
    }
}

/// A `videos.list` body with one item.
pub fn video_body(id: &str, title: &str, duration: &str) -> serde_json::Value {
    json!({
        "kind": "youtube#videoListResponse",
        "items": [{
            "id": id,
            "snippet": {
                "title": title,
                "thumbnails": {
                    "default": { "url": format!("https://i.ytimg.com/vi/{id}/default.jpg") },
                    "high": { "url": format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg") }
                }
            },
            "contentDetails": { "duration": duration }
        }]
    })
}

/// A `search.list` body whose items carry the given video ids.
pub fn search_body(ids: &[&str]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": { "kind": "youtube#video", "videoId": id },
                "snippet": { "title": format!("result {id}") }
            })
        })
        .collect();
    json!({ "kind": "youtube#searchListResponse", "items": items })
}

/// A `playlistItems.list` page, optionally carrying a continuation token.
pub fn playlist_page(ids: &[&str], next_page_token: Option<&str>) -> serde_json::Value {
    let items: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| json!({ "contentDetails": { "videoId": id } }))
        .collect();
    let mut body = json!({ "kind": "youtube#playlistItemListResponse", "items": items });
    if let Some(token) = next_page_token {
        body["nextPageToken"] = json!(token);
    }
    body
}

/// The structured error envelope the Data API wraps failures in.
pub fn error_body(message: &str) -> serde_json::Value {
    json!({ "error": { "code": 403, "message": message, "errors": [] } })
}
