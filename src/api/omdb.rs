//! Metadata API client (OMDb-compatible)
//!
//! Provides title search and detail lookups.
//! API docs: https://www.omdbapi.com

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{CineError, Result};
use crate::models::{MovieItem, SearchFilters};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com";

/// Metadata API client
#[derive(Debug, Clone)]
pub struct MetadataClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl MetadataClient {
    /// Create a new client against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// GET `/?{query}&apikey=..` and decode the body
    ///
    /// The API answers failures with a JSON envelope, sometimes under a
    /// non-2xx status, so the body is decoded whatever the status.
    async fn get<T: DeserializeOwned>(&self, query: &str) -> Result<T> {
        let url = format!(
            "{}/?{}&apikey={}",
            self.base_url,
            query,
            urlencoding::encode(&self.api_key)
        );
        tracing::debug!(%url, "metadata request");

        let response = self.client.get(&url).send().await?;
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

    /// Search without detail enrichment
    pub async fn search_brief(&self, query: &str, filters: &SearchFilters) -> Result<Vec<MovieItem>> {
        let query_string = format!("s={}{}", urlencoding::encode(query), filters.to_query());
        let envelope: SearchEnvelope = self.get(&query_string).await?;
        envelope.into_items()
    }

    /// Search and return fully detailed records, in search order
    ///
    /// Issues one detail lookup per result, all in flight at once. Any
    /// failed lookup fails the whole search.
    pub async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<MovieItem>> {
        let brief = self.search_brief(query, filters).await?;
        tracing::debug!(query, count = brief.len(), "fetching details for search results");

        let lookups = brief.iter().map(|item| self.details(&item.imdb_id));
        try_join_all(lookups).await.inspect_err(|e| {
            tracing::warn!(query, error = %e, "search detail lookup failed");
        })
    }

    /// Fetch a single full record
    pub async fn details(&self, imdb_id: &str) -> Result<MovieItem> {
        let query_string = format!("i={}", urlencoding::encode(imdb_id));
        let envelope: DetailEnvelope = self.get(&query_string).await?;
        envelope.into_item()
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Search", default)]
    search: Option<Vec<MovieItem>>,
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

impl SearchEnvelope {
    fn into_items(self) -> Result<Vec<MovieItem>> {
        match (self.response.as_str(), self.search) {
            ("True", Some(items)) => Ok(items),
            _ => Err(CineError::NotFound(
                self.error.unwrap_or_else(|| "No results found".to_string()),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(flatten)]
    item: serde_json::Value,
}

impl DetailEnvelope {
    fn into_item(self) -> Result<MovieItem> {
        if self.response != "True" {
            return Err(CineError::NotFound(
                self.error
                    .unwrap_or_else(|| "Movie details not found".to_string()),
            ));
        }
        serde_json::from_value(self.item)
            .map_err(|e| CineError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}
