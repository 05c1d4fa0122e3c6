//! JSON extraction for Guardian search responses
//!
//! The search endpoint answers with a fixed envelope: a `response`
//! object whose `results` array holds one object per article. Each
//! result is read in a fixed field order, and the first missing or
//! mistyped required field stops the walk. The records accumulated
//! before that point are still returned, together with the terminating
//! error, so a partially broken feed degrades to a shorter list instead
//! of an empty screen.

use crate::error::{Error, Result};
use crate::types::{Article, Thumbnail};
use chrono::NaiveDateTime;
use serde_json::Value;

/// Fallback author used when an article has no contributor tag
pub const NO_AUTHOR: &str = "No author";

/// Upstream publication timestamp shape (ISO-8601 with a literal Z)
const PUBLISHED_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Display shape for publication dates
const PUBLISHED_OUTPUT_FORMAT: &str = "%d-%m-%Y";

/// Outcome of one extraction pass
///
/// `articles` holds everything read in document order up to the first
/// failure; `failure` is the parse error that stopped the walk, if any.
/// A complete pass over an empty `results` array is a successful, empty
/// extraction.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Records accumulated in document order
    pub articles: Vec<ExtractedArticle>,
    /// The parse error that terminated the walk early, if any
    pub failure: Option<Error>,
}

impl Extraction {
    fn complete(articles: Vec<ExtractedArticle>) -> Self {
        Self {
            articles,
            failure: None,
        }
    }

    fn stopped(articles: Vec<ExtractedArticle>, failure: Error) -> Self {
        Self {
            articles,
            failure: Some(failure),
        }
    }

    /// True when the whole document was walked without a failure
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// One result read from the document, before its thumbnail is fetched
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedArticle {
    /// Headline from `fields.headline`
    pub title: String,
    /// Section name
    pub section: String,
    /// Publication date, already reformatted
    pub published: String,
    /// Contributor name or the [`NO_AUTHOR`] sentinel
    pub author: String,
    /// Absolute article URL
    pub url: String,
    /// Thumbnail URL from `fields.thumbnail`, not yet downloaded
    pub thumbnail_url: String,
}

impl ExtractedArticle {
    /// Finalize into an [`Article`] once the thumbnail fetch resolved
    pub fn into_article(self, thumbnail: Option<Thumbnail>) -> Article {
        Article {
            title: self.title,
            section: self.section,
            published: self.published,
            author: self.author,
            url: self.url,
            thumbnail,
        }
    }
}

/// Extract article records from a search response body
///
/// Empty or all-whitespace input is an empty, complete extraction; no
/// parse is attempted. See [`Extraction`] for the partial-batch
/// behavior on malformed documents.
pub fn extract(body: &str) -> Extraction {
    if body.trim().is_empty() {
        return Extraction::complete(Vec::new());
    }

    let document: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return Extraction::stopped(Vec::new(), Error::parse("response", e.to_string()));
        }
    };

    let Some(envelope) = document.get("response") else {
        return Extraction::stopped(Vec::new(), Error::parse("response", "missing object"));
    };
    let Some(results) = envelope.get("results").and_then(Value::as_array) else {
        return Extraction::stopped(
            Vec::new(),
            Error::parse("response.results", "missing array"),
        );
    };

    let mut articles = Vec::with_capacity(results.len());
    for (index, result) in results.iter().enumerate() {
        match extract_result(result, index) {
            Ok(article) => articles.push(article),
            Err(e) => return Extraction::stopped(articles, e),
        }
    }
    Extraction::complete(articles)
}

/// Read one result object
///
/// Fields are read in a fixed order, so when several are broken the
/// reported path is always the first one in that order.
fn extract_result(result: &Value, index: usize) -> Result<ExtractedArticle> {
    let section = string_field(result, index, "sectionName")?;
    let published = reformat_published(&string_field(result, index, "webPublicationDate")?);
    let url = string_field(result, index, "webUrl")?;
    let author = author_field(result, index)?;

    let fields = result
        .get("fields")
        .filter(|value| value.is_object())
        .ok_or_else(|| Error::parse(result_path(index, "fields"), "missing object"))?;
    let title = fields_string(fields, index, "headline")?;
    let thumbnail_url = fields_string(fields, index, "thumbnail")?;

    Ok(ExtractedArticle {
        title,
        section,
        published,
        author,
        url,
        thumbnail_url,
    })
}

/// Reformat an upstream publication timestamp for display
///
/// `"2017-10-29T06:00:20Z"` becomes `"29-10-2017"`. A value that does
/// not match the expected shape is returned unchanged; this is the one
/// locally-recovered fault in the walk.
pub fn reformat_published(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, PUBLISHED_INPUT_FORMAT) {
        Ok(parsed) => parsed.format(PUBLISHED_OUTPUT_FORMAT).to_string(),
        Err(e) => {
            tracing::debug!(raw = %raw, error = %e, "publication date kept unformatted");
            raw.to_string()
        }
    }
}

fn result_path(index: usize, key: &str) -> String {
    format!("response.results[{}].{}", index, key)
}

fn string_field(result: &Value, index: usize, key: &str) -> Result<String> {
    result
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| Error::parse(result_path(index, key), "missing string"))
}

fn fields_string(fields: &Value, index: usize, key: &str) -> Result<String> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            Error::parse(
                result_path(index, &format!("fields.{}", key)),
                "missing string",
            )
        })
}

/// Resolve the author from the contributor tags
///
/// An empty `tags` array is the documented "no contributor" case and
/// resolves to the sentinel. A missing or mistyped `tags` key, or a
/// first tag without `webTitle`, is a parse failure like any other
/// required field.
fn author_field(result: &Value, index: usize) -> Result<String> {
    let tags = result
        .get("tags")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::parse(result_path(index, "tags"), "missing array"))?;

    match tags.first() {
        None => Ok(NO_AUTHOR.to_string()),
        Some(tag) => tag
            .get("webTitle")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::parse(result_path(index, "tags[0].webTitle"), "missing string")),
    }
}
