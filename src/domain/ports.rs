use crate::domain::section::Section;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Fetches a JSON document, reusing a cached copy younger than `revalidate`.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_json(&self, url: &str, revalidate: Duration) -> Result<serde_json::Value>;
}

/// Resolves where each section's content lives and how long it stays fresh.
pub trait SourceProvider: Send + Sync {
    fn source_url(&self, section: Section) -> Option<&str>;
    fn revalidate(&self, section: Section) -> Duration;
}
