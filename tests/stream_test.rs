//! Streaming API client tests
//!
//! Tests media info lookup, descriptor classification and stream resolution.

use cinetui::api::StreamClient;
use cinetui::error::CineError;
use cinetui::models::Playback;
use mockito::{Matcher, Server};

// =============================================================================
// Media Info Tests
// =============================================================================

#[tokio::test]
async fn test_media_info_movie_playlist() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/api/v1/mediaInfo")
        .match_query(Matcher::UrlEncoded("id".into(), "tt1375666".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"data": {
                "playlist": [
                    {"title": "English", "file": "en-ref"},
                    {"title": "Hindi", "file": "hi-ref"}
                ],
                "key": "k-123"
            }}"#,
        )
        .create_async()
        .await;

    let client = StreamClient::new(server.url());
    let descriptor = client.media_info("tt1375666").await.unwrap();
    mock.assert_async().await;

    assert!(!descriptor.is_series());
    match descriptor.classify().unwrap() {
        Playback::Movie { options, key } => {
            assert_eq!(key, "k-123");
            assert_eq!(options.len(), 2);
            assert_eq!(options[1].title, "Hindi");
            assert_eq!(options[1].file, "hi-ref");
        }
        other => panic!("expected movie, got {:?}", other),
    }
}

#[tokio::test]
async fn test_media_info_series_playlist() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/v1/mediaInfo")
        .match_query(Matcher::UrlEncoded("id".into(), "tt0903747".into()))
        .with_status(200)
        .with_body(
            r#"{"data": {
                "playlist": [
                    {"title": "Season 1", "folder": [
                        {"title": "Episode 1", "folder": [
                            {"title": "English", "file": "s1e1-en"}
                        ]}
                    ]}
                ],
                "key": "series-key"
            }}"#,
        )
        .create_async()
        .await;

    let client = StreamClient::new(server.url());
    let descriptor = client.media_info("tt0903747").await.unwrap();

    assert!(descriptor.is_series());
    assert_eq!(
        descriptor.pick(0, 0, 0).unwrap(),
        ("s1e1-en".to_string(), "series-key".to_string())
    );
}

#[tokio::test]
async fn test_media_info_without_data_has_no_stream() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/api/v1/mediaInfo")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"data": null}"#)
        .create_async()
        .await;

    let client = StreamClient::new(server.url());
    let descriptor = client.media_info("tt0000001").await.unwrap();
    assert!(matches!(descriptor.classify(), Err(CineError::NoStreamAvailable)));
}

// =============================================================================
// Stream Resolution Tests
// =============================================================================

#[tokio::test]
async fn test_resolve_posts_file_and_key() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/api/v1/getStream")
        .match_body(Matcher::Json(serde_json::json!({
            "file": "en-ref",
            "key": "k-123"
        })))
        .with_status(200)
        .with_body(r#"{"data": {"link": "https://cdn.example/en.m3u8"}}"#)
        .create_async()
        .await;

    let client = StreamClient::new(server.url());
    let url = client.resolve_stream("en-ref", "k-123").await.unwrap();

    mock.assert_async().await;
    assert_eq!(url, "https://cdn.example/en.m3u8");
}

#[tokio::test]
async fn test_resolve_falls_back_to_stream_field() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api/v1/getStream")
        .with_status(200)
        .with_body(r#"{"data": {"stream": "https://cdn.example/only-stream.m3u8"}}"#)
        .create_async()
        .await;

    let client = StreamClient::new(server.url());
    let url = client.resolve_stream("f", "k").await.unwrap();
    assert_eq!(url, "https://cdn.example/only-stream.m3u8");
}

#[tokio::test]
async fn test_resolve_prefers_link_over_later_fields() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api/v1/getStream")
        .with_status(200)
        .with_body(
            r#"{"data": {"url": "d", "stream": "c", "streamUrl": "b", "link": "a"}}"#,
        )
        .create_async()
        .await;

    let client = StreamClient::new(server.url());
    assert_eq!(client.resolve_stream("f", "k").await.unwrap(), "a");
}

#[tokio::test]
async fn test_resolve_without_url_is_no_stream() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/api/v1/getStream")
        .with_status(200)
        .with_body(r#"{"data": {"link": ""}}"#)
        .create_async()
        .await;

    let client = StreamClient::new(server.url());
    let err = client.resolve_stream("f", "k").await.unwrap_err();
    assert!(matches!(err, CineError::NoStreamAvailable));
    assert_eq!(err.to_string(), "No stream available");
}
