//! Output module for page summaries and failure reports
//!
//! This module handles:
//! - Rendering page summaries as JSON lines
//! - Redacting email addresses with HMAC-SHA256
//! - Reporting terminal fetch failures
//! - Logging unexpected errors through a pluggable logger

mod jsonl;
mod logger;
mod redact;
mod traits;

pub use jsonl::JsonLinesOutput;
pub use logger::{logger_for, ErrorLogger, SilentLogger, VerboseLogger};
pub use redact::hmac_hex;
pub use traits::{OutputError, OutputHandler, OutputResult, PageRecord};
