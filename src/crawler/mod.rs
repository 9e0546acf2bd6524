//! Crawler module for fetching harvested URLs
//!
//! This module contains the core fetching logic, including:
//! - HTTP fetching with failure classification
//! - Response parsing for title and email
//! - The rate-limited, retry-aware dispatch queue

mod fetcher;
mod parser;
mod queue;

pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use parser::{parse_response, ParsedPage};
pub use queue::{DispatchQueue, Pipeline, QueueStats};

use crate::url::extract_urls;
use crate::HarvestError;
use std::borrow::Cow;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Feeds every URL found in a line-oriented input into the queue
///
/// Lines are read as they arrive, so the queue starts dispatching while the
/// input is still open. URLs are enqueued in the order they appear. Bytes that
/// are not valid UTF-8 are replaced, so one bad line never ends the input.
///
/// # Returns
///
/// * `Ok(usize)` - Number of URLs handed to the queue (duplicates included)
/// * `Err(HarvestError)` - Reading the input failed
pub async fn harvest<R>(mut reader: R, queue: &DispatchQueue) -> Result<usize, HarvestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let mut found = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = decode_line(&buf);
        for url in extract_urls(&line) {
            tracing::trace!("Found {} in input", url);
            queue.enqueue(url);
            found += 1;
        }
    }

    Ok(found)
}

/// Strips the line ending and decodes the rest lossily
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);

    let line = String::from_utf8_lossy(raw);
    if let Cow::Owned(_) = line {
        tracing::warn!("Input line is not valid UTF-8, replacing bad bytes");
    }
    line
}
