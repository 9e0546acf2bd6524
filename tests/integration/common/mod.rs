//! Shared test doubles for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use bracket_harvest::crawler::Fetcher;
use bracket_harvest::output::{OutputHandler, OutputResult, PageRecord};
use bracket_harvest::{FetchError, FetchResult};
use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// A scripted answer for one fetch
#[derive(Debug, Clone)]
pub enum Reply {
    Body(&'static str),
    Status(u16),
    /// Answers with the status after a delay in milliseconds
    SlowStatus(u64, u16),
    Network,
}

/// Fetcher that replays scripted replies and records when each URL was fetched
pub struct ScriptedFetcher {
    start: Instant,
    script: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<(String, Duration)>>,
}

impl ScriptedFetcher {
    /// Creates a fetcher whose clock starts now; unscripted URLs get an empty page
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            script: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Queues replies for successive fetches of `url`
    pub fn script(&self, url: &str, replies: Vec<Reply>) {
        self.script
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .extend(replies);
    }

    /// Every fetch so far as (url, time since creation)
    pub fn calls(&self) -> Vec<(String, Duration)> {
        self.calls.lock().unwrap().clone()
    }

    /// Times at which `url` was fetched
    pub fn calls_for(&self, url: &str) -> Vec<Duration> {
        self.calls()
            .into_iter()
            .filter(|(called, _)| called == url)
            .map(|(_, at)| at)
            .collect()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), self.start.elapsed()));

        let reply = self
            .script
            .lock()
            .unwrap()
            .get_mut(url)
            .and_then(|replies| replies.pop_front())
            .unwrap_or(Reply::Body("<html></html>"));

        match reply {
            Reply::Body(body) => Ok(body.to_string()),
            Reply::Status(status) => Err(FetchError::Status {
                url: url.to_string(),
                status,
            }),
            Reply::SlowStatus(millis, status) => {
                tokio::time::sleep(Duration::from_millis(millis)).await;
                Err(FetchError::Status {
                    url: url.to_string(),
                    status,
                })
            }
            Reply::Network => Err(FetchError::Network {
                url: url.to_string(),
                message: "connection refused".to_string(),
            }),
        }
    }
}

/// Output handler that keeps records and failures in memory
pub struct MemoryOutput {
    start: Instant,
    pub pages: Mutex<Vec<PageRecord>>,
    pub failures: Mutex<Vec<(String, Duration)>>,
}

impl MemoryOutput {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            pages: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        })
    }

    pub fn pages(&self) -> Vec<PageRecord> {
        self.pages.lock().unwrap().clone()
    }

    pub fn failures(&self) -> Vec<(String, Duration)> {
        self.failures.lock().unwrap().clone()
    }
}

impl OutputHandler for MemoryOutput {
    fn record_page(&self, page: &PageRecord) -> OutputResult<()> {
        self.pages.lock().unwrap().push(page.clone());
        Ok(())
    }

    fn record_failure(&self, url: &str) -> OutputResult<()> {
        self.failures
            .lock()
            .unwrap()
            .push((url.to_string(), self.start.elapsed()));
        Ok(())
    }
}

/// Writer appending into a buffer that the test can inspect
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Asserts that an event happened at `expected_ms`, allowing for timer granularity
pub fn assert_at(actual: Duration, expected_ms: u64) {
    let expected = Duration::from_millis(expected_ms);
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(2),
        "expected event at {:?}, happened at {:?}",
        expected,
        actual
    );
}
