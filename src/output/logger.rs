//! Pluggable logging for unexpected errors
//!
//! Retryable fetch failures and terminal failures have their own paths. Anything
//! else that goes wrong while settling an attempt is handed to an `ErrorLogger`.

use crate::HarvestError;
use std::sync::Arc;

/// Sink for errors that are neither retried nor reported as terminal failures
pub trait ErrorLogger: Send + Sync {
    fn error(&self, error: &HarvestError);
}

/// Logger that discards everything; the default
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentLogger;

impl ErrorLogger for SilentLogger {
    fn error(&self, _error: &HarvestError) {}
}

/// Logger that emits every error as a tracing event (stderr in the CLI)
#[derive(Debug, Clone, Copy, Default)]
pub struct VerboseLogger;

impl ErrorLogger for VerboseLogger {
    fn error(&self, error: &HarvestError) {
        tracing::error!("{}", error);
    }
}

/// Picks the logger matching the requested verbosity
pub fn logger_for(verbose: bool) -> Arc<dyn ErrorLogger> {
    if verbose {
        Arc::new(VerboseLogger)
    } else {
        Arc::new(SilentLogger)
    }
}
