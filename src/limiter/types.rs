//! Rate limiting types
//!
//! This module defines the immutable limit configuration and the outcome
//! of a single admission decision.

use std::time::Duration;

use crate::error::{CrptError, Result};

/// Immutable rate limit configuration
///
/// Set at gate construction, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    /// Maximum number of sends started per window
    pub max_requests: u32,
    /// Window duration
    pub window: Duration,
}

impl RateLimit {
    /// Create a rate limit of `max_requests` per `window`
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// `max_requests` per second
    pub fn per_second(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(1))
    }

    /// `max_requests` per minute
    pub fn per_minute(max_requests: u32) -> Self {
        Self::new(max_requests, Duration::from_secs(60))
    }

    /// Validate the limit parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_requests == 0 {
            return Err(CrptError::config("Request limit must be positive"));
        }

        if self.window.is_zero() {
            return Err(CrptError::config("Window duration must be positive"));
        }

        Ok(())
    }
}

/// Outcome of one accounting decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// A send slot was granted and counted
    Admitted,
    /// The window is full; capacity frees up after the given duration
    RetryIn(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_new() {
        let limit = RateLimit::new(10, Duration::from_secs(5));
        assert_eq!(limit.max_requests, 10);
        assert_eq!(limit.window, Duration::from_secs(5));
        assert!(limit.validate().is_ok());
    }

    #[test]
    fn test_per_second() {
        let limit = RateLimit::per_second(3);
        assert_eq!(limit.max_requests, 3);
        assert_eq!(limit.window, Duration::from_secs(1));
    }

    #[test]
    fn test_per_minute() {
        let limit = RateLimit::per_minute(100);
        assert_eq!(limit.max_requests, 100);
        assert_eq!(limit.window, Duration::from_secs(60));
    }

    #[test]
    fn test_validate_rejects_zero_requests() {
        let limit = RateLimit::new(0, Duration::from_secs(1));
        assert!(matches!(limit.validate(), Err(CrptError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let limit = RateLimit::new(1, Duration::ZERO);
        assert!(matches!(limit.validate(), Err(CrptError::Config(_))));
    }
}
