//! JSON-lines output
//!
//! Every page becomes one line of JSON on the record stream. Emails are
//! replaced by their HMAC before serialization, so cleartext addresses never
//! reach the output.

use crate::config::SecretKey;
use crate::output::redact::hmac_hex;
use crate::output::traits::{OutputHandler, OutputResult, PageRecord};
use serde::Serialize;
use std::io::{self, Write};
use std::sync::Mutex;

/// Serialized form of a page record, absent fields omitted
#[derive(Debug, Serialize)]
struct RedactedRecord<'a> {
    url: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

type SharedWriter = Mutex<Box<dyn Write + Send>>;

/// Output handler writing JSON lines to one stream and failures to another
pub struct JsonLinesOutput {
    key: SecretKey,
    records: SharedWriter,
    failures: SharedWriter,
}

impl JsonLinesOutput {
    /// Creates a handler writing records to stdout and failures to stderr
    pub fn stdio(key: SecretKey) -> Self {
        Self::new(key, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    /// Creates a handler over arbitrary writers
    pub fn new(
        key: SecretKey,
        records: Box<dyn Write + Send>,
        failures: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            key,
            records: Mutex::new(records),
            failures: Mutex::new(failures),
        }
    }

    /// Renders a record as a single JSON line (without the newline)
    pub fn render(&self, page: &PageRecord) -> OutputResult<String> {
        let redacted = RedactedRecord {
            url: &page.url,
            title: page.title.as_deref().filter(|t| !t.is_empty()),
            email: page
                .email
                .as_deref()
                .filter(|e| !e.is_empty())
                .map(|email| hmac_hex(&self.key, email)),
        };

        Ok(serde_json::to_string(&redacted)?)
    }
}

impl OutputHandler for JsonLinesOutput {
    fn record_page(&self, page: &PageRecord) -> OutputResult<()> {
        let line = self.render(page)?;
        write_line(&self.records, &line)
    }

    fn record_failure(&self, url: &str) -> OutputResult<()> {
        write_line(&self.failures, &format!("Http request failed for {}", url))
    }
}

fn write_line(writer: &SharedWriter, line: &str) -> OutputResult<()> {
    // A poisoned lock only means another writer panicked mid-line
    let mut writer = writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    writeln!(writer, "{}", line)?;
    writer.flush()?;
    Ok(())
}
