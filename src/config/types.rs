use serde::Deserialize;
use std::time::Duration;

/// Default spacing between first-attempt dispatches (milliseconds)
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Default wait before retrying a failed URL (milliseconds)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 60_000;

/// Main configuration structure for Bracket-Harvest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub queue: QueueConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

/// Dispatch queue timing configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QueueConfig {
    /// Minimum time between the starts of two first-attempt dispatches (milliseconds)
    #[serde(rename = "request-delay", default = "default_request_delay")]
    pub request_delay: u64,

    /// Time between a retryable failure and its retry (milliseconds)
    #[serde(rename = "retry-delay", default = "default_retry_delay")]
    pub retry_delay: u64,
}

impl QueueConfig {
    /// Returns the request delay as a Duration
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay)
    }

    /// Returns the retry delay as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay)
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            request_delay: DEFAULT_REQUEST_DELAY_MS,
            retry_delay: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

fn default_request_delay() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

fn default_retry_delay() -> u64 {
    DEFAULT_RETRY_DELAY_MS
}

/// HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request; the client default when unset
    #[serde(rename = "user-agent", default)]
    pub user_agent: Option<String>,
}
