//! Connection settings for a Redash instance.

use std::fmt;
use std::time::Duration;

use crate::error::{RedashError, Result};

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Default delay between two polls of a query execution job.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1_000);

/// Default total time to wait for a query execution job.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_millis(60_000);

/// How often and for how long a deferred query execution is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_POLL_TIMEOUT,
        }
    }
}

/// Everything needed to construct a [`RedashClient`](crate::RedashClient).
///
/// Read once at startup. The client copies what it needs and never looks
/// at the configuration again.
#[derive(Clone)]
pub struct RedashConfig {
    /// Base URL of the Redash instance, e.g. `https://redash.example.com`.
    pub url: String,
    /// User or query API key, sent as `Authorization: Key <api_key>`.
    pub api_key: String,
    pub timeout: Duration,
    /// Additional headers, either a JSON object or `key=value` pairs
    /// separated by `;` or `,`.
    pub extra_headers: Option<String>,
    pub poll: PollSettings,
}

impl RedashConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
            extra_headers: None,
            poll: PollSettings::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_extra_headers(mut self, extra_headers: impl Into<String>) -> Self {
        self.extra_headers = Some(extra_headers.into());
        self
    }

    pub fn with_poll_settings(mut self, poll: PollSettings) -> Self {
        self.poll = poll;
        self
    }

    /// The base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    /// Checks that both the URL and the API key are present.
    pub fn validate(&self) -> Result<()> {
        if self.base_url().is_empty() {
            return Err(RedashError::Configuration(
                "REDASH_URL must be set to the base URL of your Redash instance".to_string(),
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(RedashError::Configuration(
                "REDASH_API_KEY must be set to a Redash API key".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for RedashConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedashConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("extra_headers", &self.extra_headers.as_ref().map(|_| "<set>"))
            .field("poll", &self.poll)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_requires_url() {
        let config = RedashConfig::new("  ", "secret");
        assert_matches!(config.validate(), Err(RedashError::Configuration(_)));
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = RedashConfig::new("https://redash.example.com", "");
        assert_matches!(config.validate(), Err(RedashError::Configuration(_)));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = RedashConfig::new("https://redash.example.com/", "secret");
        assert_eq!(config.base_url(), "https://redash.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = RedashConfig::new("https://redash.example.com", "super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn test_defaults() {
        let config = RedashConfig::new("https://redash.example.com", "secret");
        assert_eq!(config.timeout, Duration::from_millis(30_000));
        assert_eq!(config.poll.interval, Duration::from_millis(1_000));
        assert_eq!(config.poll.timeout, Duration::from_millis(60_000));
    }
}
