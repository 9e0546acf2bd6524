use std::fmt;
use std::sync::Arc;

/// Which fetch of a URL an attempt is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttemptNumber {
    /// The gated first dispatch
    First,

    /// The single ungated retry after a retryable failure
    Retry,
}

impl AttemptNumber {
    /// Returns the attempt number as 1 or 2
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::First => 1,
            Self::Retry => 2,
        }
    }
}

impl fmt::Display for AttemptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A single fetch-and-settle cycle for one URL
///
/// Attempts are transient: one exists from the moment a fetch begins until its
/// outcome has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// The URL exactly as it was enqueued
    pub url: Arc<str>,

    pub number: AttemptNumber,
}

impl Attempt {
    /// Creates the first attempt for a URL
    pub fn first(url: impl Into<Arc<str>>) -> Self {
        Self {
            url: url.into(),
            number: AttemptNumber::First,
        }
    }

    /// Returns the retry that follows this attempt
    ///
    /// Returns None for a retry: a URL is never attempted a third time.
    pub fn retry(&self) -> Option<Self> {
        match self.number {
            AttemptNumber::First => Some(Self {
                url: Arc::clone(&self.url),
                number: AttemptNumber::Retry,
            }),
            AttemptNumber::Retry => None,
        }
    }
}
