//! HTTP client for the WordPress.com public REST API.
//!
//! Wraps `reqwest` with the blog's site-scoped base URL, a per-request
//! timeout, and typed envelope deserialization. Posts are addressed by slug
//! via the `posts/slug:{slug}` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::WordPressError;
use crate::types::Post;

const DEFAULT_BASE_URL: &str = "https://public-api.wordpress.com/rest/v1.1/sites/liftblog.com/";

/// Client for the blog's WordPress.com public API.
///
/// Use [`WordPressClient::new`] for production or
/// [`WordPressClient::with_base_url`] to point at a mock server in tests.
pub struct WordPressClient {
    client: Client,
    base_url: Url,
}

impl WordPressClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`WordPressError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, WordPressError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`WordPressError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`WordPressError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, WordPressError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("liftdb/0.1 (lift-inventory)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // endpoint paths append to it instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| WordPressError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Fetches a post by slug and returns its rendered HTML body.
    ///
    /// # Errors
    ///
    /// - [`WordPressError::Http`] on network failure.
    /// - [`WordPressError::UnexpectedStatus`] on a non-2xx response (the API
    ///   answers 404 for unknown slugs).
    /// - [`WordPressError::Deserialize`] if the response does not match the
    ///   expected envelope.
    pub async fn get_post_content(&self, slug: &str) -> Result<String, WordPressError> {
        let url = self.post_url(slug);
        tracing::debug!(%url, "fetching post");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WordPressError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let post: Post =
            serde_json::from_str(&body).map_err(|e| WordPressError::Deserialize {
                context: format!("posts/slug:{slug}"),
                source: e,
            })?;

        Ok(post.content)
    }

    /// Builds the full endpoint URL for a post slug.
    fn post_url(&self, slug: &str) -> String {
        format!("{}posts/slug:{slug}", self.base_url)
    }
}
