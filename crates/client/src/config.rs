//! Client configuration: where the server is and how hard to try.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// How many extra attempts a failed call gets.
///
/// Cart mutations are not idempotent, so the default is no retry at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further attempt.
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::from_millis(500),
        }
    }

    pub fn with_retries(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff.saturating_mul(factor)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme + host (+ port) the relative endpoint paths are joined to.
    pub base_url: String,
    /// Whole-request timeout; `None` leaves it to the transport.
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
            retry: RetryPolicy::none(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Read `STOREFRONT_BASE_URL`, `STOREFRONT_TIMEOUT_MS`,
    /// `STOREFRONT_MAX_RETRIES` and `STOREFRONT_RETRY_BACKOFF_MS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`ClientConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("STOREFRONT_BASE_URL").unwrap_or_else(|| {
            tracing::info!("STOREFRONT_BASE_URL not set; using {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        let mut config = Self::new(base_url);

        if let Some(ms) = parse_var(&lookup, "STOREFRONT_TIMEOUT_MS")? {
            config.timeout = Some(Duration::from_millis(ms));
        }
        if let Some(retries) = parse_var(&lookup, "STOREFRONT_MAX_RETRIES")? {
            config.retry.max_retries = u32::try_from(retries).map_err(|_| ConfigError::Invalid {
                var: "STOREFRONT_MAX_RETRIES",
                expected: "a 32-bit count",
                value: retries.to_string(),
            })?;
        }
        if let Some(ms) = parse_var(&lookup, "STOREFRONT_RETRY_BACKOFF_MS")? {
            config.retry.initial_backoff = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn parse_var(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ConfigError::Invalid {
            var,
            expected: "a non-negative integer",
            value: raw,
        })
}
