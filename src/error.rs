//! Error types for the CRPT client
//!
//! This module defines all error types used throughout the crate.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for the CRPT client
pub type Result<T> = std::result::Result<T, CrptError>;

/// Main error type for the CRPT client
#[derive(Error, Debug)]
pub enum CrptError {
    /// Configuration errors, fatal at construction time
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submission cancelled while waiting for a send slot
    #[error("Submission cancelled before admission")]
    Cancelled,

    /// Non-blocking submission found no capacity in the current window
    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited {
        /// Time until the current window frees up
        retry_after: Duration,
    },

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Endpoint-level errors
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint
        status: u16,
        /// Error body or description
        message: String,
    },

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),
}

/// Helper functions for creating specific errors
impl CrptError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    /// Whether the caller may retry the submission
    ///
    /// Configuration errors are permanent; everything else is recoverable
    /// from the gate's point of view (capacity for a failed send has
    /// already been consumed, so retrying competes for a fresh slot).
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CrptError::config("request limit must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: request limit must be positive"
        );
    }

    #[test]
    fn test_api_error_display() {
        let err = CrptError::api(500, "internal error");
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("internal error"));
    }

    #[test]
    fn test_rate_limited_carries_retry_after() {
        let err = CrptError::RateLimited {
            retry_after: Duration::from_millis(250),
        };
        match err {
            CrptError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Duration::from_millis(250));
            }
            _ => panic!("expected RateLimited"),
        }
    }

    #[test]
    fn test_retryability() {
        assert!(!CrptError::config("bad").is_retryable());
        assert!(CrptError::Cancelled.is_retryable());
        assert!(CrptError::api(503, "unavailable").is_retryable());
        assert!(
            CrptError::RateLimited {
                retry_after: Duration::from_secs(1)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CrptError = parse_err.into();
        assert!(matches!(err, CrptError::Serialization(_)));
    }
}
