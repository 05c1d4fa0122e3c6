//! Guardian search pipeline orchestration
//!
//! [`NewsClient`] owns the configuration and both HTTP timeout
//! profiles, and runs the full cycle for one trigger: build the search
//! URL, fetch the document, extract the article records, then resolve
//! each record's thumbnail before handing back the finished batch.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{ExtractedArticle, extract};
use crate::fetch::HttpFetcher;
use crate::thumbnail::fetch_thumbnail;
use crate::types::Article;
use chrono::{NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters for one search trigger
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search sent as `q`; empty matches everything
    #[serde(default)]
    pub text: String,

    /// Earliest publication date, sent as `from-date`
    pub from_date: NaiveDate,
}

impl SearchQuery {
    /// Create a query for articles published today matching `text`
    ///
    /// Both fields are public; build the struct directly for a start
    /// date other than today.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_date: Utc::now().date_naive(),
        }
    }

    /// The default trigger: everything published today, no search text
    pub fn today() -> Self {
        Self::new(String::new())
    }
}

/// Client for the Guardian content search pipeline
///
/// Cloning is cheap: the underlying HTTP clients are shared, so one
/// `NewsClient` can be handed to a background task per trigger.
///
/// # Example
///
/// ```no_run
/// use newswire::{Config, NewsClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = NewsClient::new(Config::default())?;
///     for article in client.load_headlines().await? {
///         println!("{} ({})", article.title, article.section);
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct NewsClient {
    config: Config,
    list_fetcher: HttpFetcher,
    thumbnail_fetcher: HttpFetcher,
}

impl NewsClient {
    /// Create a client, validating the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the configuration fails
    /// [`Config::validate`] or an HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let list_fetcher = HttpFetcher::new(config.list_timeouts, &config.user_agent)?;
        let thumbnail_fetcher = HttpFetcher::new(config.thumbnail_timeouts, &config.user_agent)?;
        Ok(Self {
            config,
            list_fetcher,
            thumbnail_fetcher,
        })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one full pipeline cycle for today's headlines
    ///
    /// Equivalent to [`NewsClient::search`] with [`SearchQuery::today`],
    /// which is the request the original single "load" trigger issued.
    ///
    /// # Errors
    ///
    /// Same as [`NewsClient::search`].
    pub async fn load_headlines(&self) -> Result<Vec<Article>> {
        self.search(&SearchQuery::today()).await
    }

    /// Run one full pipeline cycle: fetch, extract, resolve thumbnails
    ///
    /// A failed thumbnail never drops its article (the article keeps an
    /// absent thumbnail), and an extraction that stops early still
    /// yields the records read before the failure. The list fetch
    /// itself is the only hard failure point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] or [`Error::HttpStatus`] when the
    /// article-list request fails, and [`Error::Config`] when the
    /// endpoint cannot be assembled into a URL.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>> {
        let url = self.build_search_url(query)?;
        tracing::debug!(url = %redact_api_key(&url), "requesting article list");

        let body = self.list_fetcher.fetch_text(url.as_str()).await?;

        let extraction = extract(&body);
        if let Some(failure) = &extraction.failure {
            tracing::warn!(
                error = %failure,
                extracted = extraction.articles.len(),
                "extraction stopped early, continuing with partial batch"
            );
        }

        let articles = self.attach_thumbnails(extraction.articles).await;
        tracing::debug!(count = articles.len(), "article batch assembled");
        Ok(articles)
    }

    /// Assemble the search URL in the fixed parameter order
    fn build_search_url(&self, query: &SearchQuery) -> Result<Url> {
        let mut url = Url::parse(&self.config.endpoint).map_err(|e| Error::Config {
            message: format!("endpoint is not a valid URL: {}", e),
            key: Some("endpoint".into()),
        })?;
        url.query_pairs_mut()
            .append_pair("q", &query.text)
            .append_pair(
                "from-date",
                &query.from_date.format("%Y-%m-%d").to_string(),
            )
            .append_pair("show-fields", "thumbnail,headline")
            .append_pair("show-tags", "contributor")
            .append_pair("api-key", &self.config.api_key);
        Ok(url)
    }

    /// Resolve thumbnails and finalize the batch, preserving order
    async fn attach_thumbnails(&self, extracted: Vec<ExtractedArticle>) -> Vec<Article> {
        if !self.config.fetch_thumbnails {
            return extracted
                .into_iter()
                .map(|record| record.into_article(None))
                .collect();
        }

        // buffered (not buffer_unordered) keeps document order; each
        // future resolves to Option, so one failed image cannot
        // disturb its neighbors
        let concurrency = self.config.thumbnail_concurrency.max(1);
        stream::iter(extracted)
            .map(|record| {
                let fetcher = &self.thumbnail_fetcher;
                async move {
                    let thumbnail = fetch_thumbnail(fetcher, &record.thumbnail_url).await;
                    record.into_article(thumbnail)
                }
            })
            .buffered(concurrency)
            .collect()
            .await
    }
}

/// Render a request URL for logging with the `api-key` value masked
fn redact_api_key(url: &Url) -> String {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut safe = url.clone();
    {
        let mut serializer = safe.query_pairs_mut();
        serializer.clear();
        for (key, value) in &pairs {
            if key == "api-key" {
                serializer.append_pair(key, "redacted");
            } else {
                serializer.append_pair(key, value);
            }
        }
    }
    safe.to_string()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
