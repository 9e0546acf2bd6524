//! Bracket-Harvest: a polite bracketed-link summarizer
//!
//! This crate reads text, pulls URLs out of bracketed segments, fetches each
//! URL at most once through a rate-limited dispatch queue, and emits a redacted
//! JSON summary (title and hashed email) for every page it reaches.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Bracket-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Attempt task aborted: {0}")]
    Task(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Secret key is missing: set the {0} environment variable")]
    MissingSecret(String),
}

/// Failures reported by a [`crawler::Fetcher`]
#[derive(Debug, Error)]
pub enum FetchError {
    /// The host could not be reached or the transfer broke off
    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a status in `[400, 600)`
    #[error("HTTP error code {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// Returns true if the dispatch queue may schedule a retry for this failure
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Status { .. })
    }
}

/// Result type alias for Bracket-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{DispatchQueue, Fetcher, HttpFetcher};
pub use output::{ErrorLogger, JsonLinesOutput, OutputHandler};
pub use url::{extract_urls, normalize_scheme};
