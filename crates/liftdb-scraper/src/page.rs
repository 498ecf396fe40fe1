//! Plain HTTP fetcher for pages outside the blog API, chiefly map documents
//! and published sheet tabs.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScrapeError;

/// Fetches raw page bodies with a configurable user agent.
///
/// The map and sheet hosts serve reduced documents to non-browser user
/// agents, so the crawl presents a browser-like one throughout.
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Creates a client with the given per-request timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches a URL and returns the response body as text.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Http`] on network failure.
    /// - [`ScrapeError::UnexpectedStatus`] on a non-2xx response.
    pub async fn fetch_text(&self, url: &str) -> Result<String, ScrapeError> {
        tracing::debug!(url, "fetching page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
