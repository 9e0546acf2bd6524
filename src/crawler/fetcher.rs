//! HTTP fetcher implementation
//!
//! This module handles the single GET request behind every dispatch attempt:
//! - Building the HTTP client from configuration
//! - Normalizing bare hosts to HTTPS
//! - Classifying failures as network or HTTP status errors
//!
//! Fetchers never retry on their own; retries belong to the dispatch queue.

use crate::config::HttpConfig;
use crate::url::to_request_url;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::Client;

/// Source of page bodies for the dispatch queue
///
/// The queue only depends on this trait, so tests and alternative transports
/// can stand in for [`HttpFetcher`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a harvested URL and returns the full response body
    ///
    /// # Errors
    ///
    /// * `FetchError::Network` - The host could not be reached
    /// * `FetchError::Status` - The response status was in `[400, 600)`
    /// * `FetchError::InvalidUrl` - The URL cannot be requested at all
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

/// Builds an HTTP client with the configured user agent
///
/// Redirects follow the client's default policy and no request timeout is set
/// beyond what reqwest applies on its own.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().gzip(true).brotli(true);

    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    builder.build()
}

/// [`Fetcher`] backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        let request_url = to_request_url(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        tracing::trace!("GET {}", request_url);

        let response = self
            .client
            .get(request_url.clone())
            .send()
            .await
            .map_err(|e| classify_send_error(url, e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: format!("failed to read body: {}", e),
        })
    }
}

/// Maps a reqwest send failure onto the fetch error taxonomy
fn classify_send_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_builder() {
        return FetchError::InvalidUrl {
            url: url.to_string(),
            reason: error.to_string(),
        };
    }

    let message = if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    };

    FetchError::Network {
        url: url.to_string(),
        message,
    }
}
