//! Today's headlines example
//!
//! This example demonstrates the core functionality of newswire:
//! - Building a configuration with an API key from the environment
//! - Creating a client instance
//! - Running a search in the background
//! - Receiving the finished article batch
//!
//! Run with a real key for real results:
//!
//! ```sh
//! GUARDIAN_API_KEY=... cargo run --example headlines
//! ```

use newswire::{Config, NewsClient, spawn_headlines};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Build configuration; the default key is the public rate-limited one
    let mut config = Config::default();
    if let Ok(key) = std::env::var("GUARDIAN_API_KEY") {
        config.api_key = key;
    }

    // Create client instance
    let client = NewsClient::new(config)?;

    // Run today's search in the background and wait for the batch
    let articles = spawn_headlines(client).batch().await;

    if articles.is_empty() {
        println!("No articles today (or the fetch failed; see logs)");
        return Ok(());
    }

    println!("✓ {} articles\n", articles.len());
    for article in &articles {
        let marker = if article.thumbnail.is_some() { "🖼" } else { " " };
        println!("{} {} [{}] {}", marker, article.published, article.section, article.title);
        println!("    by {} - {}", article.author, article.url);
    }

    Ok(())
}
