use crate::helpers::{TestAdapter, error_body, video_body};
use claims::{assert_err, assert_none, assert_ok, assert_some};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};
use youtube_bridge::YoutubeError;

#[tokio::test]
async fn details_issues_a_single_lookup_keyed_by_the_id() {
    let adapter = TestAdapter::spawn().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .and(query_param("part", "snippet,contentDetails"))
        .and(query_param("key", "api-key-test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_body("dQw4w9WgXcQ", "Never Gonna Give You Up", "PT3M33S")),
        )
        .expect(1)
        .mount(&adapter.api_server)
        .await;

    let details = assert_ok!(adapter.youtube.details("dQw4w9WgXcQ", true).await);
    let details = assert_some!(details);

    assert_eq!(details.title, "Never Gonna Give You Up");
    assert_eq!(details.duration.as_seconds(), 213);
    assert_eq!(details.duration.to_string(), "03:33");
    assert_eq!(
        details.thumbnail_url,
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
    );
    assert_eq!(details.id.as_ref(), "dQw4w9WgXcQ");
}

#[tokio::test]
async fn details_extracts_the_id_from_a_watch_url() {
    let adapter = TestAdapter::spawn().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_body("dQw4w9WgXcQ", "Never Gonna Give You Up", "PT3M33S")),
        )
        .expect(1)
        .mount(&adapter.api_server)
        .await;

    let details = adapter
        .youtube
        .details("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10", false)
        .await;

    assert_some!(assert_ok!(details));
}

#[tokio::test]
async fn details_returns_none_when_no_video_matches() {
    let adapter = TestAdapter::spawn().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "items": [] })))
        .expect(1)
        .mount(&adapter.api_server)
        .await;

    let details = assert_ok!(adapter.youtube.details("dQw4w9WgXcQ", true).await);
    assert_none!(details);
}

#[tokio::test]
async fn details_surfaces_api_failures_as_errors() {
    let adapter = TestAdapter::spawn().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_body("quotaExceeded")))
        .expect(1)
        .mount(&adapter.api_server)
        .await;

    let error = assert_err!(adapter.youtube.details("dQw4w9WgXcQ", true).await);
    match error {
        YoutubeError::Api { status, message } => {
            assert_eq!(status.as_u16(), 403);
            assert_eq!(message, "quotaExceeded");
        }
        other => panic!("expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn single_field_accessors_each_issue_their_own_lookup() {
    let adapter = TestAdapter::spawn().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("id", "dQw4w9WgXcQ"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_body("dQw4w9WgXcQ", "Never Gonna Give You Up", "PT1H1M1S")),
        )
        .expect(3)
        .mount(&adapter.api_server)
        .await;

    let title = assert_ok!(adapter.youtube.title("dQw4w9WgXcQ", true).await);
    assert_eq!(title.as_deref(), Some("Never Gonna Give You Up"));

    let duration = assert_ok!(adapter.youtube.duration("dQw4w9WgXcQ", true).await);
    assert_eq!(assert_some!(duration).to_string(), "01:01:01");

    let thumbnail = assert_ok!(adapter.youtube.thumbnail("dQw4w9WgXcQ", true).await);
    assert_eq!(
        thumbnail.as_deref(),
        Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
    );
}

#[tokio::test]
async fn track_wraps_details_into_a_presentable_record() {
    let adapter = TestAdapter::spawn().await;

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(video_body("dQw4w9WgXcQ", "Never Gonna Give You Up", "PT3M33S")),
        )
        .mount(&adapter.api_server)
        .await;

    let track = assert_ok!(adapter.youtube.track("dQw4w9WgXcQ", true).await);
    let track = assert_some!(track);

    assert_eq!(track.link, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    assert_eq!(track.video_id.as_ref(), "dQw4w9WgXcQ");
    assert_eq!(track.duration.to_string(), "03:33");
}

#[tokio::test]
async fn the_default_thumbnail_is_used_when_high_is_missing() {
    let adapter = TestAdapter::spawn().await;

    let body = serde_json::json!({
        "items": [{
            "id": "dQw4w9WgXcQ",
            "snippet": {
                "title": "Never Gonna Give You Up",
                "thumbnails": {
                    "default": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg" }
                }
            },
            "contentDetails": { "duration": "PT3M33S" }
        }]
    });

    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&adapter.api_server)
        .await;

    let details = assert_some!(assert_ok!(adapter.youtube.details("dQw4w9WgXcQ", true).await));
    assert_eq!(
        details.thumbnail_url,
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg"
    );
}
