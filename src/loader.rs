//! Background search execution and single-batch delivery
//!
//! One spawned task per trigger. The worker runs the whole pipeline
//! and hands the finished batch back exactly once over a oneshot
//! channel; there is no incremental delivery and no cancellation. A
//! consumer that goes away mid-flight simply never receives the batch.

use crate::client::{NewsClient, SearchQuery};
use crate::error::Result;
use crate::types::Article;
use tokio::sync::oneshot;

/// Receiving side of one spawned search
#[derive(Debug)]
pub struct SearchHandle {
    rx: oneshot::Receiver<Result<Vec<Article>>>,
}

impl SearchHandle {
    /// Await the typed pipeline outcome
    ///
    /// Returns `None` when the worker was torn down before it could
    /// deliver (runtime shutdown, or a panic inside the worker).
    pub async fn outcome(self) -> Option<Result<Vec<Article>>> {
        self.rx.await.ok()
    }

    /// Await the batch, collapsing every failure to an empty list
    ///
    /// This is the display-facing behavior: on any pipeline failure
    /// the consumer sees no items rather than an error. The failure is
    /// logged before being dropped; callers that need the cause use
    /// [`SearchHandle::outcome`].
    pub async fn batch(self) -> Vec<Article> {
        match self.outcome().await {
            Some(Ok(articles)) => articles,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "search failed, delivering empty batch");
                Vec::new()
            }
            None => {
                tracing::warn!("search worker gone before delivery, delivering empty batch");
                Vec::new()
            }
        }
    }
}

/// Spawn one search cycle on the async runtime
///
/// The pipeline runs to completion even when the returned handle has
/// been dropped; the finished batch is then discarded silently.
pub fn spawn_search(client: NewsClient, query: SearchQuery) -> SearchHandle {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = client.search(&query).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "background search failed");
        }
        // The receiver may already be gone; the batch is discarded then
        tx.send(result).ok();
    });
    SearchHandle { rx }
}

/// Spawn the default today's-headlines cycle on the async runtime
pub fn spawn_headlines(client: NewsClient) -> SearchHandle {
    spawn_search(client, SearchQuery::today())
}
