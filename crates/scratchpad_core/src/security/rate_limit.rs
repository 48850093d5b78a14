//! Fixed-window admission control.

use crate::error::{ScratchpadError, ScratchpadResult};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Outcome of one admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Admission {
    pub allowed: bool,
    /// Time until the oldest admission leaves the window; set on rejection.
    pub retry_after: Option<Duration>,
}

/// Sliding log of admitted request instants bounded to one window.
///
/// # Invariants
/// - `admitted` is ordered oldest first and never holds more than
///   `max_requests` entries.
/// - An admission whose age reaches `window` no longer counts.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    admitted: VecDeque<Instant>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            admitted: VecDeque::with_capacity(max_requests),
        }
    }

    /// Attempts admission at the current instant.
    pub fn admit(&mut self) -> Admission {
        self.admit_at(Instant::now())
    }

    /// Attempts admission at `now`.
    pub fn admit_at(&mut self, now: Instant) -> Admission {
        while let Some(&oldest) = self.admitted.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                self.admitted.pop_front();
            } else {
                break;
            }
        }

        if self.admitted.len() < self.max_requests {
            self.admitted.push_back(now);
            return Admission {
                allowed: true,
                retry_after: None,
            };
        }

        let retry_after = self
            .admitted
            .front()
            .map(|&oldest| self.window - now.saturating_duration_since(oldest))
            .unwrap_or(self.window);
        Admission {
            allowed: false,
            retry_after: Some(retry_after),
        }
    }

    /// Admits or fails with `RateLimited`.
    pub fn check(&mut self) -> ScratchpadResult<()> {
        let admission = self.admit();
        if admission.allowed {
            return Ok(());
        }
        Err(ScratchpadError::RateLimited {
            retry_after: admission.retry_after.unwrap_or(self.window),
            max_requests: self.max_requests,
            window: self.window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RateLimiter;
    use std::time::{Duration, Instant};

    #[test]
    fn rejects_request_over_limit_with_bounded_retry_after() {
        let window = Duration::from_secs(60);
        let mut limiter = RateLimiter::new(3, window);
        let start = Instant::now();

        for offset in 0..3 {
            let admission = limiter.admit_at(start + Duration::from_secs(offset));
            assert!(admission.allowed);
            assert_eq!(admission.retry_after, None);
        }

        let rejected = limiter.admit_at(start + Duration::from_secs(10));
        assert!(!rejected.allowed);
        let retry_after = rejected.retry_after.expect("rejection carries retry_after");
        assert!(retry_after > Duration::ZERO);
        assert!(retry_after <= window);
        assert_eq!(retry_after, Duration::from_secs(50));

        let admitted = limiter.admit_at(start + Duration::from_secs(10) + retry_after);
        assert!(admitted.allowed);
    }

    #[test]
    fn rejected_attempts_do_not_consume_capacity() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(1));
        let start = Instant::now();
        assert!(limiter.admit_at(start).allowed);
        assert!(!limiter.admit_at(start + Duration::from_millis(200)).allowed);
        assert!(!limiter.admit_at(start + Duration::from_millis(400)).allowed);
        assert!(limiter.admit_at(start + Duration::from_secs(1)).allowed);
    }

    #[test]
    fn full_burst_at_one_instant_waits_whole_window() {
        let window = Duration::from_secs(60);
        let mut limiter = RateLimiter::new(60, window);
        let start = Instant::now();
        for _ in 0..60 {
            assert!(limiter.admit_at(start).allowed);
        }
        let rejected = limiter.admit_at(start);
        assert_eq!(rejected.retry_after, Some(window));
        assert!(limiter.admit_at(start + window).allowed);
    }

    #[test]
    fn check_maps_rejection_to_error() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        limiter.check().expect("first request admitted");
        let err = limiter.check().expect_err("second request rejected");
        assert!(err.user_message().starts_with("Rate limit exceeded"));
    }
}
