use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::error;

use super::YoutubeError;
use super::types::{ErrorResponse, PlaylistItemsResponse, SearchListResponse, VideoListResponse};
use crate::configuration::YoutubeApiSettings;

/// Typed client for the hosted Data API. One instance per adapter; the
/// API key travels as the `key` query parameter on every request.
pub struct DataApiClient {
    http_client: Client,
    base_url: Url,
    api_key: SecretString,
}

impl DataApiClient {
    pub async fn videos_list(&self, id: &str) -> Result<VideoListResponse, YoutubeError> {
        self.get("videos", &[("part", "snippet,contentDetails"), ("id", id)])
            .await
    }

    pub async fn search_list(
        &self,
        query: &str,
        max_results: u8,
    ) -> Result<SearchListResponse, YoutubeError> {
        let max_results = max_results.to_string();
        self.get(
            "search",
            &[
                ("part", "snippet"),
                ("q", query),
                ("maxResults", &max_results),
                ("type", "video"),
            ],
        )
        .await
    }

    pub async fn playlist_items(
        &self,
        playlist_id: &str,
        page_size: u8,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse, YoutubeError> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("part", "contentDetails"),
            ("playlistId", playlist_id),
            ("maxResults", &page_size),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        self.get("playlistItems", &params).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, YoutubeError> {
        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint
        );
        let response = self
            .http_client
            .get(url)
            .query(&[("key", self.api_key.expose_secret())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Failures come wrapped in a structured error envelope.
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error.message,
                Err(_) => "unparsable error body".to_string(),
            };
            error!("Data API rejected the {} call: {}", endpoint, message);
            return Err(YoutubeError::Api { status, message });
        }

        Ok(response.json::<T>().await?)
    }
}

impl TryFrom<YoutubeApiSettings> for DataApiClient {
    type Error = reqwest::Error;

    fn try_from(settings: YoutubeApiSettings) -> Result<Self, Self::Error> {
        let http_client = Client::builder().timeout(settings.timeout_ms).build()?;
        Ok(Self {
            http_client,
            base_url: settings.base_url,
            api_key: settings.api_key,
        })
    }
}
