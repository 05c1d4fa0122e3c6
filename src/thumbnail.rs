//! Per-article thumbnail downloading

use crate::fetch::HttpFetcher;
use crate::types::Thumbnail;

/// Download one article thumbnail, absorbing every failure
///
/// A failed thumbnail never fails its article: a non-200 status, a
/// network fault, and a body that is not a recognizable image all come
/// back as `None`, each logged with the offending URL.
pub async fn fetch_thumbnail(fetcher: &HttpFetcher, url: &str) -> Option<Thumbnail> {
    let bytes = match fetcher.fetch_bytes(url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "thumbnail fetch failed");
            return None;
        }
    };

    match Thumbnail::from_bytes(bytes) {
        Ok(thumbnail) => Some(thumbnail),
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "thumbnail body is not an image");
            None
        }
    }
}
