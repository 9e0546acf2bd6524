use tokio::time::Instant;

/// Spacing gate for first-attempt dispatches
///
/// The gate starts open. Dispatching closes it until a fixed instant, and only
/// the expiry of that instant opens it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gate {
    /// A dispatch may start immediately
    #[default]
    Open,

    /// The next dispatch has to wait until `reopens_at`
    Closed { reopens_at: Instant },
}

impl Gate {
    /// Returns true if a dispatch may start now
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns the instant the gate reopens, if it is closed
    pub fn reopens_at(&self) -> Option<Instant> {
        match self {
            Self::Open => None,
            Self::Closed { reopens_at } => Some(*reopens_at),
        }
    }

    /// Closes the gate until `reopens_at`
    pub fn close(&mut self, reopens_at: Instant) {
        *self = Self::Closed { reopens_at };
    }

    /// Opens the gate once its timer has fired
    pub fn reopen(&mut self) {
        *self = Self::Open;
    }
}
