use std::collections::{HashSet, VecDeque};

/// Outcome of offering a URL to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The URL was appended to the pending backlog
    Queued,

    /// The URL is already waiting in the pending backlog
    AlreadyPending,

    /// The URL has already had its first attempt dispatched
    AlreadyDispatched,
}

impl Admission {
    /// Returns true if the offer changed the frontier
    pub fn is_queued(&self) -> bool {
        matches!(self, Self::Queued)
    }
}

/// De-duplicating bookkeeping for URLs handed to the dispatch queue
///
/// The frontier keeps two collections:
/// - the pending backlog, in arrival order and free of duplicates
/// - the dispatched set, every URL whose first attempt has started
///
/// A URL moves from pending to dispatched exactly once and never leaves the
/// dispatched set, so it can never be dispatched for a first attempt again.
#[derive(Debug, Default)]
pub struct Frontier {
    /// Pending URLs in arrival order
    pending: VecDeque<String>,

    /// Membership index over `pending`
    pending_index: HashSet<String>,

    /// URLs whose first attempt has been dispatched
    dispatched: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Offers a URL to the pending backlog
    ///
    /// The URL is ignored if it was dispatched before or is already pending.
    pub fn admit(&mut self, url: String) -> Admission {
        if self.dispatched.contains(&url) {
            return Admission::AlreadyDispatched;
        }

        if !self.pending_index.insert(url.clone()) {
            return Admission::AlreadyPending;
        }

        self.pending.push_back(url);
        Admission::Queued
    }

    /// Removes the head of the pending backlog and marks it dispatched
    ///
    /// Returns None if nothing is pending.
    pub fn take_next(&mut self) -> Option<String> {
        let url = self.pending.pop_front()?;
        self.pending_index.remove(&url);
        self.dispatched.insert(url.clone());
        Some(url)
    }

    /// Returns the number of URLs waiting for a first dispatch
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether the pending backlog is empty
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns the number of URLs dispatched so far
    pub fn dispatched_len(&self) -> usize {
        self.dispatched.len()
    }
}
