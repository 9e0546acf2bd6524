//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the record
//! that is handed to them for every page the queue reaches.

use crate::crawler::ParsedPage;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Summary of a fetched page, keyed by the URL exactly as it was harvested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// The URL as enqueued (before scheme normalization)
    pub url: String,

    /// Page title (if available)
    pub title: Option<String>,

    /// First email found on the page, in cleartext
    pub email: Option<String>,
}

impl PageRecord {
    /// Builds a record from a parsed response
    pub fn new(url: impl Into<String>, parsed: ParsedPage) -> Self {
        Self {
            url: url.into(),
            title: parsed.title,
            email: parsed.email,
        }
    }
}

/// Trait for output handlers
///
/// Output handlers render page summaries and terminal failures at the process
/// boundary. They are shared between attempt tasks and must be thread-safe.
pub trait OutputHandler: Send + Sync {
    /// Records a successfully fetched and parsed page
    fn record_page(&self, page: &PageRecord) -> OutputResult<()>;

    /// Records a URL whose retry failed as well
    fn record_failure(&self, url: &str) -> OutputResult<()>;
}
