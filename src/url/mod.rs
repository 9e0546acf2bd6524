//! URL handling module for Bracket-Harvest
//!
//! This module finds URLs inside bracketed text and turns harvested URLs into
//! addresses that can be requested.

mod brackets;
mod normalize;

// Re-export main functions
pub use brackets::extract_urls;
pub use normalize::{normalize_scheme, to_request_url};
