//! HTTP fetching with independent connect and read timeouts

use crate::config::TimeoutProfile;
use crate::error::{Error, Result};

/// A GET-only HTTP client bound to one timeout profile
///
/// The pipeline holds two of these: a patient one for the article-list
/// request and a short-fused one for thumbnails. Cloning is cheap; the
/// underlying client is shared.
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher for one timeout profile
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the underlying HTTP client cannot be
    /// constructed (e.g., an unusable user agent string).
    pub fn new(profile: TimeoutProfile, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(profile.connect)
            .timeout(profile.read)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config {
                message: format!("failed to build HTTP client: {}", e),
                key: None,
            })?;
        Ok(Self { client })
    }

    /// GET a URL and return the body as text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] on connect failure, timeout, or a
    /// broken transfer, and [`Error::HttpStatus`] for any response
    /// status other than 200.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.send(url).await?;
        response.text().await.map_err(Error::from_reqwest)
    }

    /// GET a URL and return the raw body bytes
    ///
    /// # Errors
    ///
    /// Same as [`HttpFetcher::fetch_text`].
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.send(url).await?;
        let bytes = response.bytes().await.map_err(Error::from_reqwest)?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Error::from_reqwest)?;

        // Exactly 200 counts as success; other 2xx codes do not
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::debug!(url = %url, status = status.as_u16(), "non-200 response");
            return Err(Error::HttpStatus(status.as_u16()));
        }
        Ok(response)
    }
}
