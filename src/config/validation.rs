use crate::config::types::{Config, HttpConfig, QueueConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_queue_config(&config.queue)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates dispatch queue timing
pub fn validate_queue_config(config: &QueueConfig) -> Result<(), ConfigError> {
    if config.request_delay < 1 {
        return Err(ConfigError::Validation(format!(
            "request-delay must be >= 1ms, got {}ms",
            config.request_delay
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if let Some(user_agent) = &config.user_agent {
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be empty when set".to_string(),
            ));
        }

        if user_agent.chars().any(|c| c.is_control()) {
            return Err(ConfigError::Validation(format!(
                "user-agent must not contain control characters, got {:?}",
                user_agent
            )));
        }
    }

    Ok(())
}
