//! Fixed-origin window accounting
//!
//! The window is an approximation of a rolling window: instead of sliding
//! continuously it resets wholesale once a full duration has elapsed since
//! its origin. This is the accounting scheme of the upstream API contract
//! and keeps every decision O(1).

use tokio::time::Instant;

use super::types::{Admission, RateLimit};

/// Mutable accounting record for the current window
///
/// Owned exclusively by the gate and mutated only while holding the gate's
/// lock. `count` tracks sends started, not sends succeeded.
#[derive(Debug)]
pub(super) struct FixedWindow {
    started_at: Instant,
    count: u32,
}

impl FixedWindow {
    pub(super) fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            count: 0,
        }
    }

    /// Perform one admission decision at time `now`
    ///
    /// Resets the window lazily when a full duration has elapsed, then
    /// either grants and counts a slot or reports how long until the
    /// window frees up. Must be called under the gate's lock.
    pub(super) fn try_admit(&mut self, limit: &RateLimit, now: Instant) -> Admission {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= limit.window {
            self.count = 0;
            self.started_at = now;
        }

        if self.count < limit.max_requests {
            self.count += 1;
            return Admission::Admitted;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        Admission::RetryIn(limit.window.saturating_sub(elapsed))
    }

    /// Sends counted against the current window
    #[cfg(test)]
    pub(super) fn count(&self) -> u32 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn limit(max: u32, secs: u64) -> RateLimit {
        RateLimit::new(max, Duration::from_secs(secs))
    }

    #[test]
    fn test_admits_up_to_limit() {
        let now = Instant::now();
        let mut window = FixedWindow::new(now);
        let limit = limit(3, 1);

        for _ in 0..3 {
            assert_eq!(window.try_admit(&limit, now), Admission::Admitted);
        }
        assert_eq!(window.count(), 3);
    }

    #[test]
    fn test_full_window_reports_remaining_time() {
        let now = Instant::now();
        let mut window = FixedWindow::new(now);
        let limit = limit(1, 10);

        assert_eq!(window.try_admit(&limit, now), Admission::Admitted);

        let later = now + Duration::from_secs(4);
        assert_eq!(
            window.try_admit(&limit, later),
            Admission::RetryIn(Duration::from_secs(6))
        );
        // A denied attempt does not consume capacity
        assert_eq!(window.count(), 1);
    }

    #[test]
    fn test_resets_after_full_duration() {
        let now = Instant::now();
        let mut window = FixedWindow::new(now);
        let limit = limit(2, 1);

        assert_eq!(window.try_admit(&limit, now), Admission::Admitted);
        assert_eq!(window.try_admit(&limit, now), Admission::Admitted);

        let next = now + Duration::from_secs(1);
        // Exactly one window elapsed: resets and admits
        assert_eq!(window.try_admit(&limit, next), Admission::Admitted);
        assert_eq!(window.count(), 1);
    }

    #[test]
    fn test_no_reset_before_boundary() {
        let now = Instant::now();
        let mut window = FixedWindow::new(now);
        let limit = limit(1, 1);

        assert_eq!(window.try_admit(&limit, now), Admission::Admitted);

        let almost = now + Duration::from_millis(999);
        assert_eq!(
            window.try_admit(&limit, almost),
            Admission::RetryIn(Duration::from_millis(1))
        );
    }

    #[test]
    fn test_stale_window_resets_regardless_of_count() {
        let now = Instant::now();
        let mut window = FixedWindow::new(now);
        let limit = limit(1, 1);

        assert_eq!(window.try_admit(&limit, now), Admission::Admitted);

        // Far past the boundary: the reset covers any number of elapsed windows
        let much_later = now + Duration::from_secs(30);
        assert_eq!(window.try_admit(&limit, much_later), Admission::Admitted);
        assert_eq!(window.count(), 1);
    }
}
