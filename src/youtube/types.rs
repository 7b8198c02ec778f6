//! Response models for the three Data API endpoints this adapter calls.
//! Only the fields the bot consumes are kept; serde skips the rest.

use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Deserialize, Debug)]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(rename = "contentDetails")]
    pub content_details: ContentDetails,
}

#[derive(Deserialize, Debug)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Deserialize, Debug, Default)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

#[derive(Deserialize, Debug)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Deserialize, Debug)]
pub struct ContentDetails {
    pub duration: String,
}

#[derive(Deserialize, Debug)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Deserialize, Debug)]
pub struct SearchItem {
    pub id: SearchId,
}

// `search.list` ids are objects; `videoId` is absent for channel hits.
#[derive(Deserialize, Debug)]
pub struct SearchId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct PlaylistItem {
    #[serde(rename = "contentDetails")]
    pub content_details: PlaylistItemDetails,
}

#[derive(Deserialize, Debug)]
pub struct PlaylistItemDetails {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// The error envelope the Data API wraps non-success responses in.
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    pub message: String,
}
