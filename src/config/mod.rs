//! Configuration module for Bracket-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and reading the secret key used for email redaction.
//!
//! # Example
//!
//! ```no_run
//! use bracket_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Retrying failed URLs after {}ms", config.queue.retry_delay);
//! ```

mod parser;
mod secret;
mod types;
mod validation;

// Re-export types
pub use secret::{SecretKey, SECRET_ENV_VAR};
pub use types::{
    Config, HttpConfig, QueueConfig, DEFAULT_REQUEST_DELAY_MS, DEFAULT_RETRY_DELAY_MS,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, validate_queue_config};
