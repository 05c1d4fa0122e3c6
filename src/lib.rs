//! # newswire
//!
//! Client library for the Guardian content API with thumbnail fetching.
//!
//! ## Design Philosophy
//!
//! newswire is designed to be:
//! - **Resilient** - a broken image or a half-parseable payload never sinks the batch
//! - **Sensible defaults** - works out of the box against the public endpoint
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Single-batch** - one trigger, one finished list of articles, no streaming
//!
//! ## Quick Start
//!
//! ```no_run
//! use newswire::{Config, NewsClient, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         api_key: "my-api-key".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let client = NewsClient::new(config)?;
//!     let articles = client.search(&SearchQuery::new("brexit")).await?;
//!
//!     for article in articles {
//!         println!("{} [{}] {}", article.published, article.section, article.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Search orchestration client
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Article extraction from API payloads
pub mod extract;
/// HTTP fetching with timeout profiles
pub mod fetch;
/// Background search execution
pub mod loader;
/// Thumbnail retrieval
pub mod thumbnail;
/// Core types
pub mod types;

// Re-export commonly used types
pub use client::{NewsClient, SearchQuery};
pub use config::{Config, TimeoutProfile};
pub use error::{Error, NetworkKind, Result};
pub use extract::{ExtractedArticle, Extraction, NO_AUTHOR, extract};
pub use fetch::HttpFetcher;
pub use loader::{SearchHandle, spawn_headlines, spawn_search};
pub use thumbnail::fetch_thumbnail;
pub use types::{Article, ImageFormat, Thumbnail};
