//! Error types for newswire
//!
//! The pipeline reports failures as typed errors instead of silently
//! collapsing them into empty results, so callers and tests can tell a
//! network fault from a parse fault. The one place absence survives is
//! thumbnail fetching, where a failed image never blocks its article.

use thiserror::Error;

/// Result type alias for newswire operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for newswire
///
/// Each variant carries enough context to assert on the failure cause
/// without string matching against display output.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "endpoint")
        key: Option<String>,
    },

    /// Network-level failure: the request never produced a usable response
    #[error("network error: {message}")]
    Network {
        /// How the request failed
        kind: NetworkKind,
        /// Message from the underlying HTTP client
        message: String,
    },

    /// The server answered with a status other than 200 OK
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),

    /// A required part of the JSON document was missing or mistyped
    #[error("parse error at {path}: {message}")]
    Parse {
        /// JSON path of the field that could not be read
        /// (e.g., "response.results[3].webUrl")
        path: String,
        /// What went wrong at that path
        message: String,
    },

    /// Downloaded bytes did not match any known image signature
    #[error("undecodable image data: {0}")]
    Decode(String),
}

/// Classification of a network failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkKind {
    /// The connection could not be established
    Connect,
    /// The connect or read deadline elapsed
    Timeout,
    /// The connection was established but the exchange failed mid-flight
    Transfer,
}

impl Error {
    /// Classify a `reqwest` error into a [`Error::Network`] variant.
    ///
    /// Timeouts are checked before connect failures because a timed-out
    /// connect reports both flags and the deadline is the actionable part.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            NetworkKind::Timeout
        } else if e.is_connect() {
            NetworkKind::Connect
        } else {
            NetworkKind::Transfer
        };
        Error::Network {
            kind,
            message: e.to_string(),
        }
    }

    /// Build a parse error for a JSON path
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}
