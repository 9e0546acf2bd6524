//! Bracket segment scanning
//!
//! Lines of free text may carry URLs inside square brackets. Only the outermost
//! pair of a nested group counts, a bracket preceded by a backslash is literal,
//! and a closing bracket with nothing open collapses every segment seen so far
//! on the line into one.

use regex::Regex;
use std::sync::OnceLock;

/// Matches a URL-shaped token: optional http(s) scheme, a host with a TLD,
/// then an optional path and query.
const URL_PATTERN: &str =
    r"(?:https?://)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b[-a-zA-Z0-9()@:%_+.~#?&/=]*";

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern is a valid regex"))
}

/// Extracts the URLs carried by the bracketed segments of a line
///
/// Every segment contributes at most one URL, the last URL-shaped token inside
/// it. URLs are returned in the order their segments appear.
///
/// # Examples
///
/// ```
/// use bracket_harvest::url::extract_urls;
///
/// let urls = extract_urls("see [ www.first.com] and [www.second.com]");
/// assert_eq!(urls, vec!["www.first.com", "www.second.com"]);
///
/// assert!(extract_urls("nothing \\[ www.google.com ]").is_empty());
/// ```
pub fn extract_urls(line: &str) -> Vec<String> {
    bracket_segments(line)
        .into_iter()
        .filter_map(last_url)
        .collect()
}

/// Splits a line into the contents of its outermost bracket segments
fn bracket_segments(line: &str) -> Vec<&str> {
    // Byte ranges of segment contents, excluding the brackets themselves
    let mut closed: Vec<(usize, usize)> = Vec::new();
    let mut open: Option<usize> = None;
    let mut previous: Option<char> = None;

    for (index, ch) in line.char_indices() {
        let escaped = previous == Some('\\');
        previous = Some(ch);
        if escaped {
            continue;
        }

        match ch {
            '[' if open.is_none() => open = Some(index + ch.len_utf8()),
            ']' => match open.take() {
                Some(start) => closed.push((start, index)),
                None => collapse(&mut closed, index),
            },
            _ => {}
        }
    }

    // An unclosed segment at end of line is dropped
    closed
        .into_iter()
        .map(|(start, end)| &line[start..end])
        .collect()
}

/// Merges all closed segments into one that ends at `end`
fn collapse(closed: &mut Vec<(usize, usize)>, end: usize) {
    if let Some(&(start, _)) = closed.first() {
        closed.clear();
        closed.push((start, end));
    }
}

fn last_url(segment: &str) -> Option<String> {
    url_regex()
        .find_iter(segment)
        .last()
        .map(|m| m.as_str().to_string())
}
