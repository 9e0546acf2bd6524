//! Dispatch queue for harvested URLs
//!
//! This module handles:
//! - De-duplicating URLs for the lifetime of the queue
//! - Dispatching first attempts one at a time, in arrival order
//! - Spacing first attempts a fixed delay apart (start to start)
//! - Retrying a failed URL once, outside the spacing gate
//!
//! The queue is an actor: one task owns the frontier and the gate and is the
//! only place they are mutated. Producers talk to it through an unbounded
//! channel, so `enqueue` never blocks and never fails.

use crate::config::QueueConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::parse_response;
use crate::output::{ErrorLogger, OutputHandler, PageRecord, SilentLogger};
use crate::state::{Attempt, Frontier, Gate};
use crate::HarvestError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{sleep, sleep_until, Instant};

/// Collaborators every attempt goes through: fetch, parse, output
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    output: Arc<dyn OutputHandler>,
    logger: Arc<dyn ErrorLogger>,
}

impl Pipeline {
    /// Creates a pipeline with the silent logger
    pub fn new(fetcher: Arc<dyn Fetcher>, output: Arc<dyn OutputHandler>) -> Self {
        Self {
            fetcher,
            output,
            logger: Arc::new(SilentLogger),
        }
    }

    /// Replaces the logger used for unexpected errors
    pub fn with_logger(mut self, logger: Arc<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Runs one attempt: fetch, parse, and record the page
    async fn run(&self, attempt: &Attempt) -> Result<(), HarvestError> {
        let body = self.fetcher.fetch(&attempt.url).await?;
        let parsed = parse_response(&body);
        self.output
            .record_page(&PageRecord::new(attempt.url.to_string(), parsed))?;
        Ok(())
    }

    /// Reports a URL whose last attempt failed
    fn report_terminal(&self, attempt: &Attempt) {
        if let Err(e) = self.output.record_failure(&attempt.url) {
            self.logger.error(&e.into());
        }
    }
}

/// Point-in-time counters of the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueStats {
    /// URLs waiting for their first dispatch
    pub pending: usize,

    /// URLs whose first attempt has been dispatched
    pub dispatched: usize,

    /// Attempt tasks not yet settled, including those waiting to retry
    pub in_flight: usize,
}

enum Command {
    Enqueue(String),
    Stats(oneshot::Sender<QueueStats>),
}

/// Handle to a running dispatch queue
///
/// # Example
///
/// ```no_run
/// use bracket_harvest::config::{HttpConfig, QueueConfig, SecretKey};
/// use bracket_harvest::crawler::{DispatchQueue, HttpFetcher, Pipeline};
/// use bracket_harvest::output::JsonLinesOutput;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = Arc::new(HttpFetcher::new(&HttpConfig::default())?);
/// let output = Arc::new(JsonLinesOutput::stdio(SecretKey::from_env()?));
/// let queue = DispatchQueue::spawn(&QueueConfig::default(), Pipeline::new(fetcher, output));
///
/// queue.enqueue("www.google.com");
/// queue.enqueue("www.wikipedia.com");
/// queue.finish().await;
/// # Ok(())
/// # }
/// ```
pub struct DispatchQueue {
    inbox: mpsc::UnboundedSender<Command>,
    worker: JoinHandle<()>,
}

impl DispatchQueue {
    /// Starts the queue on the current tokio runtime
    ///
    /// The gate starts open, so the first enqueued URL is dispatched at once.
    pub fn spawn(config: &QueueConfig, pipeline: Pipeline) -> Self {
        let (inbox, commands) = mpsc::unbounded_channel();
        let dispatcher = Dispatcher {
            frontier: Frontier::new(),
            gate: Gate::default(),
            request_delay: config.request_delay(),
            retry_delay: config.retry_delay(),
            pipeline: Arc::new(pipeline),
            attempts: JoinSet::new(),
        };

        let worker = tokio::spawn(dispatcher.run(commands));
        Self { inbox, worker }
    }

    /// Offers a URL to the queue
    ///
    /// URLs seen before (pending, in flight, retrying, or settled) are ignored.
    pub fn enqueue(&self, url: impl Into<String>) {
        if let Err(mpsc::error::SendError(Command::Enqueue(url))) =
            self.inbox.send(Command::Enqueue(url.into()))
        {
            tracing::warn!("Dispatch queue has stopped, dropping {}", url);
        }
    }

    /// Returns the current counters, or None if the queue has stopped
    pub async fn stats(&self) -> Option<QueueStats> {
        let (reply, response) = oneshot::channel();
        self.inbox.send(Command::Stats(reply)).ok()?;
        response.await.ok()
    }

    /// Stops accepting URLs and waits for all outstanding work
    ///
    /// Pending URLs are still dispatched at the normal spacing, and every
    /// attempt (including scheduled retries) runs to completion.
    pub async fn finish(self) {
        drop(self.inbox);
        if let Err(e) = self.worker.await {
            tracing::error!("Dispatch queue worker failed: {}", e);
        }
    }
}

/// State owned by the queue actor
struct Dispatcher {
    frontier: Frontier,
    gate: Gate,
    request_delay: Duration,
    retry_delay: Duration,
    pipeline: Arc<Pipeline>,
    attempts: JoinSet<()>,
}

impl Dispatcher {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        let mut accepting = true;

        loop {
            if !accepting && !self.frontier.has_pending() && self.attempts.is_empty() {
                break;
            }

            let reopens_at = self.gate.reopens_at();

            tokio::select! {
                command = commands.recv(), if accepting => match command {
                    Some(command) => self.handle(command),
                    None => {
                        tracing::debug!(
                            "Inbox closed with {} pending and {} in flight",
                            self.frontier.pending_len(),
                            self.attempts.len()
                        );
                        accepting = false;
                    }
                },
                _ = sleep_until(reopens_at.unwrap_or_else(Instant::now)), if reopens_at.is_some() => {
                    self.reopen_gate();
                }
                Some(joined) = self.attempts.join_next(), if !self.attempts.is_empty() => {
                    if let Err(e) = joined {
                        self.pipeline.logger.error(&HarvestError::Task(e.to_string()));
                    }
                }
                else => break,
            }
        }

        tracing::debug!(
            "Dispatch queue drained after {} URLs",
            self.frontier.dispatched_len()
        );
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Enqueue(url) => self.enqueue(url),
            Command::Stats(reply) => {
                let _ = reply.send(self.stats());
            }
        }
    }

    fn enqueue(&mut self, url: String) {
        let admission = self.frontier.admit(url);
        if !admission.is_queued() {
            tracing::trace!("Ignoring duplicate URL ({:?})", admission);
            return;
        }

        if self.gate.is_open() {
            self.dispatch_next();
        }
    }

    /// Called when the gate timer fires
    fn reopen_gate(&mut self) {
        self.gate.reopen();
        self.dispatch_next();
    }

    /// Starts the first attempt for the head of the backlog and closes the gate
    fn dispatch_next(&mut self) {
        let Some(url) = self.frontier.take_next() else {
            return;
        };

        tracing::debug!(
            "Dispatching {} ({} still pending)",
            url,
            self.frontier.pending_len()
        );

        self.gate.close(Instant::now() + self.request_delay);
        self.attempts
            .spawn(settle(Arc::clone(&self.pipeline), url, self.retry_delay));
    }

    fn stats(&self) -> QueueStats {
        QueueStats {
            pending: self.frontier.pending_len(),
            dispatched: self.frontier.dispatched_len(),
            in_flight: self.attempts.len(),
        }
    }
}

/// Drives a URL's attempts until one succeeds or the retry fails too
///
/// The retry waits `retry_delay` from the moment the first failure is seen
/// and does not pass through the gate.
async fn settle(pipeline: Arc<Pipeline>, url: String, retry_delay: Duration) {
    let mut attempt = Attempt::first(url);

    loop {
        match pipeline.run(&attempt).await {
            Ok(()) => {
                tracing::debug!("Attempt {} for {} succeeded", attempt.number, attempt.url);
                return;
            }
            Err(HarvestError::Fetch(error)) if error.is_retryable() => match attempt.retry() {
                Some(retry) => {
                    tracing::debug!(
                        "Attempt {} failed: {}; retrying in {:?}",
                        attempt.number,
                        error,
                        retry_delay
                    );
                    sleep(retry_delay).await;
                    attempt = retry;
                }
                None => {
                    tracing::info!("Giving up on {}: {}", attempt.url, error);
                    pipeline.report_terminal(&attempt);
                    return;
                }
            },
            Err(error) => {
                pipeline.logger.error(&error);
                return;
            }
        }
    }
}
