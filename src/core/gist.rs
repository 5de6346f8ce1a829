//! Remote content fetcher.
//!
//! Issues a GET against a gist URL, parses the body as JSON and keeps the
//! parsed document for the caller's revalidation window.

use crate::core::cache::RevalidationCache;
use crate::domain::ports::ContentFetcher;
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;

/// One hour, the window used by most sections.
pub const DEFAULT_REVALIDATE: Duration = Duration::from_secs(3600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CACHE_ENTRIES: usize = 64;

pub struct GistClient {
    client: Client,
    cache: Mutex<RevalidationCache>,
}

impl GistClient {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            cache: Mutex::new(RevalidationCache::new(DEFAULT_CACHE_ENTRIES)),
        }
    }

    /// Fetch `url` and deserialize it as `T`, cached for one hour.
    pub async fn fetch_from_gist<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.fetch_from_gist_with(url, DEFAULT_REVALIDATE).await
    }

    pub async fn fetch_from_gist_with<T: DeserializeOwned>(
        &self,
        url: &str,
        revalidate: Duration,
    ) -> Result<T> {
        let value = self.fetch_json(url, revalidate).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::error!(url, error = %e, "Gist payload does not match the expected shape");
            SiteError::from(e)
        })
    }

    pub async fn cached_documents(&self) -> usize {
        self.cache.lock().await.len()
    }

    async fn fetch_fresh(&self, url: &str) -> Result<Value> {
        tracing::debug!("Fetching gist: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Gist response status: {}", status);

        if !status.is_success() {
            return Err(SiteError::GistStatusError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        let value: Value = response.json().await?;
        Ok(value)
    }
}

#[async_trait]
impl ContentFetcher for GistClient {
    async fn fetch_json(&self, url: &str, revalidate: Duration) -> Result<Value> {
        if url.trim().is_empty() {
            return Err(SiteError::MissingConfigError {
                field: "gist url".to_string(),
            });
        }

        if let Some(value) = self.cache.lock().await.get(url) {
            tracing::debug!("Gist cache hit: {}", url);
            return Ok(value);
        }

        match self.fetch_fresh(url).await {
            Ok(value) => {
                self.cache
                    .lock()
                    .await
                    .insert(url.to_string(), value.clone(), revalidate);
                Ok(value)
            }
            Err(e) => {
                tracing::error!(url, error = %e, "Error fetching data from Gist");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logger::capture::capture_logs;
    use httpmock::prelude::*;
    use serde::Deserialize;
    use serde_json::json;

    fn client() -> GistClient {
        GistClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_from_gist_returns_parsed_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/gist.json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({ "test": "data" }));
        });

        let result: Value = client().fetch_from_gist(&server.url("/gist.json")).await.unwrap();

        mock.assert();
        assert_eq!(result, json!({ "test": "data" }));
    }

    #[tokio::test]
    async fn test_fetch_from_gist_deserializes_into_caller_type() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Payload {
            test: String,
        }

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gist.json");
            then.status(200).json_body(json!({ "test": "data" }));
        });

        let result: Payload = client().fetch_from_gist(&server.url("/gist.json")).await.unwrap();
        assert_eq!(
            result,
            Payload {
                test: "data".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_success_status_reports_status_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing.json");
            then.status(404);
        });

        let err = client()
            .fetch_from_gist::<Value>(&server.url("/missing.json"))
            .await
            .unwrap_err();

        mock.assert();
        assert!(err.to_string().contains("Not Found"));
        assert_eq!(err.to_string(), "Failed to fetch data from Gist: Not Found");
    }

    #[tokio::test]
    async fn test_failed_fetch_is_logged_with_url() {
        let (logs, _guard) = capture_logs();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/down.json");
            then.status(503);
        });

        let url = server.url("/down.json");
        assert!(client().fetch_from_gist::<Value>(&url).await.is_err());

        let output = logs.contents();
        assert!(output.contains("Error fetching data from Gist"));
        assert!(output.contains(&url));
        assert!(output.contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_network_error_is_returned() {
        // Nothing listens on port 1.
        let err = client()
            .fetch_from_gist::<Value>("http://127.0.0.1:1/gist.json")
            .await
            .unwrap_err();

        assert!(matches!(err, SiteError::HttpError(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/broken.json");
            then.status(200).body("{ not json");
        });

        let result = client()
            .fetch_from_gist::<Value>(&server.url("/broken.json"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_shape_mismatch_is_a_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/list.json");
            then.status(200).json_body(json!({ "not": "a list" }));
        });

        let err = client()
            .fetch_from_gist::<Vec<String>>(&server.url("/list.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, SiteError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_second_fetch_within_window_uses_cache() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/cached.json");
            then.status(200).json_body(json!({ "n": 1 }));
        });

        let gist = client();
        let url = server.url("/cached.json");
        let first: Value = gist.fetch_from_gist(&url).await.unwrap();
        let second: Value = gist.fetch_from_gist(&url).await.unwrap();

        mock.assert_hits(1);
        assert_eq!(first, second);
        assert_eq!(gist.cached_documents().await, 1);
    }

    #[tokio::test]
    async fn test_zero_window_always_refetches() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/fresh.json");
            then.status(200).json_body(json!({ "n": 1 }));
        });

        let gist = client();
        let url = server.url("/fresh.json");
        let _: Value = gist.fetch_from_gist_with(&url, Duration::ZERO).await.unwrap();
        let _: Value = gist.fetch_from_gist_with(&url, Duration::ZERO).await.unwrap();

        mock.assert_hits(2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/flaky.json");
            then.status(500);
        });

        let gist = client();
        let url = server.url("/flaky.json");
        assert!(gist.fetch_from_gist::<Value>(&url).await.is_err());
        assert!(gist.fetch_from_gist::<Value>(&url).await.is_err());

        mock.assert_hits(2);
        assert_eq!(gist.cached_documents().await, 0);
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected_without_request() {
        let err = client().fetch_from_gist::<Value>("  ").await.unwrap_err();
        assert!(err.is_config_error());
    }
}
