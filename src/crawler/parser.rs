//! Response parser for page summaries
//!
//! This module extracts the two facts the harvester reports for a page:
//! - The page title (from `<head><title>`)
//! - The first email address appearing anywhere in the body

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;

/// Email pattern used by HTML `type=email` inputs, tightened to require at
/// least one dot in the domain part.
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+";

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

/// Extracted information from a response body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// The page title, if present and non-blank
    pub title: Option<String>,

    /// The first email address found in the body
    pub email: Option<String>,
}

/// Parses a response body into a page summary
///
/// # Example
///
/// ```
/// use bracket_harvest::crawler::parse_response;
///
/// let parsed = parse_response("<html><head><title>Google</title></head></html>");
/// assert_eq!(parsed.title.as_deref(), Some("Google"));
/// assert_eq!(parsed.email, None);
/// ```
pub fn parse_response(body: &str) -> ParsedPage {
    let document = Html::parse_document(body);

    ParsedPage {
        title: extract_title(&document),
        email: first_email(body),
    }
}

/// Extracts the title from the document head
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("head > title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Finds the first email address in raw text
fn first_email(body: &str) -> Option<String> {
    email_regex().find(body).map(|m| m.as_str().to_string())
}
