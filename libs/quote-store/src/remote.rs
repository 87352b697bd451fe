//! Remote quote source
//!
//! The remote endpoint serves generic posts; each post title becomes a quote
//! in the `"Server"` category.

use crate::quote::{Quote, SERVER_CATEGORY};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Default remote endpoint
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Number of posts taken from each fetch
pub const DEFAULT_FETCH_LIMIT: usize = 5;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Deserialization failed: {0}")]
    Deserialize(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;

/// Source of externally authored quotes
#[async_trait]
pub trait RemoteQuoteSource: Send + Sync {
    /// Fetch the current remote quotes
    async fn fetch_quotes(&self) -> Result<Vec<Quote>>;

    /// Post a locally added quote; the outcome never changes local state
    async fn publish_quote(&self, quote: &Quote) -> Result<()>;
}

/// Post as served by the remote endpoint
///
/// Only the title is used; `userId`, `id` and `body` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePost {
    pub title: String,
}

impl RemotePost {
    /// Map to a quote, `None` for an untitled post
    pub fn into_quote(self) -> Option<Quote> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Quote::new(title, SERVER_CATEGORY))
    }
}

/// HTTP client for the remote posts endpoint
pub struct HttpQuoteSource {
    base_url: String,
    fetch_limit: usize,
    client: Client,
}

impl HttpQuoteSource {
    /// Create new remote source client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            client: Client::new(),
        }
    }

    /// Set how many posts are taken from each fetch
    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }
}

#[async_trait]
impl RemoteQuoteSource for HttpQuoteSource {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>> {
        let url = self.posts_url();
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RemoteError::Api(format!(
                "Failed to fetch quotes ({}): {}",
                status, error_text
            )));
        }

        let posts: Vec<RemotePost> = response
            .json()
            .await
            .map_err(|e| RemoteError::Deserialize(e.to_string()))?;

        let quotes: Vec<Quote> = posts
            .into_iter()
            .take(self.fetch_limit)
            .filter_map(RemotePost::into_quote)
            .collect();

        debug!("Fetched {} quotes from {}", quotes.len(), url);
        Ok(quotes)
    }

    async fn publish_quote(&self, quote: &Quote) -> Result<()> {
        let url = self.posts_url();
        debug!("POST {}", url);

        let response = self.client.post(&url).json(quote).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(RemoteError::Api(format!("Failed to sync quote ({})", status)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_into_quote() {
        let post: RemotePost = serde_json::from_str(
            r#"{"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"}"#,
        )
        .unwrap();

        assert_eq!(post.into_quote(), Some(Quote::new("sunt aut facere", "Server")));
    }

    #[test]
    fn test_untitled_post_is_skipped() {
        let post: RemotePost = serde_json::from_str(r#"{"id": 2, "title": "  "}"#).unwrap();
        assert_eq!(post.into_quote(), None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let source = HttpQuoteSource::new("http://localhost:3000/");
        assert_eq!(source.base_url(), "http://localhost:3000");
        assert_eq!(source.posts_url(), "http://localhost:3000/posts");
    }
}
