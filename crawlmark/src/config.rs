//! Configuration types for the review session.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the review session and its remote API calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewConfig {
    /// Base URL of the crawler API (label store and capability probe).
    #[serde(default = "default_api_host")]
    pub api_host: String,
    /// User agent string for outgoing requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Retry policy for the capability probe.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_api_host() -> String {
    "http://localhost:8080".to_string()
}

fn default_user_agent() -> String {
    "crawlmark/0.1".to_string()
}

fn default_timeout() -> f64 {
    30.0
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

impl ReviewConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    #[must_use]
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the probe retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

/// Retry policy for the startup capability probe.
///
/// Only transport failures are retried; a definitive `searchEnabled: false`
/// answer is terminal and never re-probed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the initial try.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    /// Initial delay between retries in seconds.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_seconds: f64,
    /// Backoff multiplier applied per attempt.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Maximum delay between retries in seconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_seconds: f64,
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_delay() -> f64 {
    0.2
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_delay() -> f64 {
    5.0
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            retry_delay_seconds: default_retry_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            max_delay_seconds: default_max_delay(),
        }
    }
}

impl RetryConfig {
    /// A policy that never retries; the probe becomes a strict one-shot.
    #[must_use]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Calculates the delay before the given retry attempt (0-based).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let delay = self.retry_delay_seconds * self.backoff_multiplier.powi(attempt as i32);
        let capped = delay.min(self.max_delay_seconds);
        Duration::from_secs_f64(capped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReviewConfig::new();
        assert_eq!(config.api_host, "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn test_builders() {
        let config = ReviewConfig::new()
            .with_api_host("http://crawler:9090")
            .with_timeout(5.0)
            .with_retry(RetryConfig::none());

        assert_eq!(config.api_host, "http://crawler:9090");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.retry.max_retries, 0);
    }

    #[test]
    fn test_retry_backoff_grows_and_caps() {
        let retry = RetryConfig::default();
        assert_eq!(retry.delay_for_attempt(0), Duration::from_millis(200));
        assert_eq!(retry.delay_for_attempt(1), Duration::from_millis(400));
        assert_eq!(retry.delay_for_attempt(10), Duration::from_secs(5));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: ReviewConfig =
            serde_json::from_str(r#"{"api_host": "http://other:1234"}"#).unwrap();
        assert_eq!(config.api_host, "http://other:1234");
        assert_eq!(config.user_agent, "crawlmark/0.1");
    }
}
