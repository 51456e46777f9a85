//! Streaming API client
//!
//! Looks up the stream descriptor for a title and resolves a
//! playlist file + access key into a playable URL.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{CineError, Result};
use crate::models::StreamDescriptor;

/// Streaming API client
#[derive(Debug, Clone)]
pub struct StreamClient {
    base_url: String,
    client: reqwest::Client,
}

/// `{data: {...}}` envelope used by both endpoints
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Serialize)]
struct StreamRequest<'a> {
    file: &'a str,
    key: &'a str,
}

/// URL fields the resolver may answer with, in priority order
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamUrls {
    link: Option<String>,
    stream_url: Option<String>,
    stream: Option<String>,
    url: Option<String>,
}

impl StreamUrls {
    /// First non-empty of link → streamUrl → stream → url
    fn into_url(self) -> Option<String> {
        [self.link, self.stream_url, self.stream, self.url]
            .into_iter()
            .flatten()
            .find(|u| !u.is_empty())
    }
}

impl StreamClient {
    /// Create a client for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Fetch the stream descriptor for a title
    ///
    /// The payload is not interpreted; classification is up to the caller.
    pub async fn media_info(&self, imdb_id: &str) -> Result<StreamDescriptor> {
        let url = format!(
            "{}/api/v1/mediaInfo?id={}",
            self.base_url,
            urlencoding::encode(imdb_id)
        );
        tracing::debug!(%url, "media info request");

        let response = self.client.get(&url).send().await?;
        let envelope: Envelope<StreamDescriptor> = decode(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Resolve a playlist file into a playable URL
    pub async fn resolve_stream(&self, file: &str, key: &str) -> Result<String> {
        let url = format!("{}/api/v1/getStream", self.base_url);
        tracing::debug!(%url, file, "stream resolve request");

        let response = self
            .client
            .post(&url)
            .json(&StreamRequest { file, key })
            .send()
            .await?;

        let envelope: Envelope<StreamUrls> = decode(response).await?;
        envelope
            .data
            .and_then(StreamUrls::into_url)
            .ok_or(CineError::NoStreamAvailable)
    }
}

async fn decode<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        if status.is_success() {
            CineError::InvalidResponse(format!("JSON parse error: {}", e))
        } else {
            CineError::InvalidResponse(format!("HTTP {}", status.as_u16()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_priority() {
        let urls = StreamUrls {
            link: None,
            stream_url: Some("b".into()),
            stream: Some("c".into()),
            url: Some("d".into()),
        };
        assert_eq!(urls.into_url().as_deref(), Some("b"));
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        let urls = StreamUrls {
            link: Some(String::new()),
            url: Some("d".into()),
            ..Default::default()
        };
        assert_eq!(urls.into_url().as_deref(), Some("d"));
        assert_eq!(StreamUrls::default().into_url(), None);
    }

    #[test]
    fn test_stream_url_field_is_camel_case() {
        let urls: StreamUrls = serde_json::from_str(r#"{"streamUrl": "x"}"#).unwrap();
        assert_eq!(urls.into_url().as_deref(), Some("x"));
    }
}
