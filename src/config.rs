//! Configuration types for newswire

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// A pair of connect/read timeouts bound to one HTTP client
///
/// The Guardian list request and the per-article thumbnail requests use
/// different profiles; see [`Config::list_timeouts`] and
/// [`Config::thumbnail_timeouts`] for the defaults. The `read` timeout is
/// applied as the whole-request deadline on the underlying client, which
/// also bounds the time spent reading the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutProfile {
    /// Maximum time to establish the connection, in milliseconds
    #[serde(with = "duration_ms_serde")]
    pub connect: Duration,

    /// Maximum time for the request to complete once sent, in milliseconds
    #[serde(with = "duration_ms_serde")]
    pub read: Duration,
}

impl TimeoutProfile {
    /// Create a profile from millisecond values
    pub fn from_millis(connect_ms: u64, read_ms: u64) -> Self {
        Self {
            connect: Duration::from_millis(connect_ms),
            read: Duration::from_millis(read_ms),
        }
    }
}

/// Client configuration
///
/// Every field has a default, so `Config::default()` (or deserializing
/// `{}`) produces a working configuration that talks to the public
/// Guardian endpoint with its free `test` key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Guardian content search endpoint
    /// (default: "https://content.guardianapis.com/search")
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Value of the `api-key` query parameter (default: "test")
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Timeouts for the article-list request (default: 25000/10000 ms)
    #[serde(default = "default_list_timeouts")]
    pub list_timeouts: TimeoutProfile,

    /// Timeouts for thumbnail requests (default: 2500/2000 ms)
    #[serde(default = "default_thumbnail_timeouts")]
    pub thumbnail_timeouts: TimeoutProfile,

    /// Download article thumbnails at all (default: true)
    ///
    /// When false the pipeline skips the per-article image requests and
    /// every article comes back with an absent thumbnail.
    #[serde(default = "default_true")]
    pub fetch_thumbnails: bool,

    /// Number of thumbnail downloads in flight at once (default: 1)
    ///
    /// 1 reproduces the strictly sequential fetch order. Higher values
    /// fan out over a buffered stream; article order and per-article
    /// failure isolation are preserved either way.
    #[serde(default = "default_thumbnail_concurrency")]
    pub thumbnail_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: default_api_key(),
            user_agent: default_user_agent(),
            list_timeouts: default_list_timeouts(),
            thumbnail_timeouts: default_thumbnail_timeouts(),
            fetch_thumbnails: true,
            thumbnail_concurrency: default_thumbnail_concurrency(),
        }
    }
}

impl Config {
    /// Check the configuration for values the pipeline cannot work with
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending key when the
    /// endpoint is empty or unparsable, a timeout is zero, or the
    /// thumbnail concurrency is zero.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config {
                message: "endpoint must not be empty".into(),
                key: Some("endpoint".into()),
            });
        }
        if let Err(e) = Url::parse(&self.endpoint) {
            return Err(Error::Config {
                message: format!("endpoint is not a valid URL: {}", e),
                key: Some("endpoint".into()),
            });
        }
        for (key, profile) in [
            ("list_timeouts", &self.list_timeouts),
            ("thumbnail_timeouts", &self.thumbnail_timeouts),
        ] {
            if profile.connect.is_zero() || profile.read.is_zero() {
                return Err(Error::Config {
                    message: "timeouts must be greater than zero".into(),
                    key: Some(key.into()),
                });
            }
        }
        if self.thumbnail_concurrency == 0 {
            return Err(Error::Config {
                message: "thumbnail_concurrency must be at least 1".into(),
                key: Some("thumbnail_concurrency".into()),
            });
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://content.guardianapis.com/search".to_string()
}

fn default_api_key() -> String {
    // The Guardian's public rate-limited key, same as the app shipped with
    "test".to_string()
}

fn default_user_agent() -> String {
    concat!("newswire/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_list_timeouts() -> TimeoutProfile {
    TimeoutProfile::from_millis(25_000, 10_000)
}

fn default_thumbnail_timeouts() -> TimeoutProfile {
    TimeoutProfile::from_millis(2_500, 2_000)
}

fn default_true() -> bool {
    true
}

fn default_thumbnail_concurrency() -> usize {
    1
}

// Millisecond Duration serialization helper
mod duration_ms_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
