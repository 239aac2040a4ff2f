//! Rate limiting implementation
//!
//! Enforces a minimum interval between sends (`1 / requests_per_second`) and
//! an optional cap on the total number of requests a client may issue.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Configuration for rate limiting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Maximum number of requests per second (0 disables throttling)
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,
    /// Maximum number of requests over the client's lifetime (0 disables the cap)
    #[serde(default)]
    pub max_requests: u64,
}

/// Longest spacing a rate may ask for (one request a year)
pub const MAX_INTERVAL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

fn default_requests_per_second() -> f64 {
    5.0
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            max_requests: 0,
        }
    }
}

impl RateLimiterConfig {
    /// Create a new rate limiter config
    pub fn new(requests_per_second: f64, max_requests: u64) -> Self {
        Self {
            requests_per_second,
            max_requests,
        }
    }

    /// No throttling and no cap
    pub fn unlimited() -> Self {
        Self::new(0.0, 0)
    }

    /// Minimum spacing between two sends, if throttling is enabled and the
    /// rate is representable
    pub fn min_interval(&self) -> Option<Duration> {
        self.checked_interval().ok().flatten()
    }

    /// Spacing for the configured rate; fails when `1 / rate` exceeds
    /// [`MAX_INTERVAL`]
    fn checked_interval(&self) -> Result<Option<Duration>> {
        let rps = self.requests_per_second;
        if !(rps > 0.0 && rps.is_finite()) {
            return Ok(None);
        }

        match Duration::try_from_secs_f64(1.0 / rps) {
            Ok(interval) if interval <= MAX_INTERVAL => Ok(Some(interval)),
            _ => Err(Error::config(format!(
                "requests_per_second {rps} is too small: the interval between requests may not exceed {} seconds",
                MAX_INTERVAL.as_secs()
            ))),
        }
    }

    /// Request cap, if enabled
    pub fn limit(&self) -> Option<u64> {
        (self.max_requests > 0).then_some(self.max_requests)
    }

    /// Reject negative, non-finite and vanishingly small rates
    pub fn validate(&self) -> Result<()> {
        let rps = self.requests_per_second;
        if rps.is_nan() || rps.is_infinite() || rps < 0.0 {
            return Err(Error::config(format!(
                "requests_per_second must be a non-negative number, got {rps}"
            )));
        }
        self.checked_interval().map(|_| ())
    }
}

/// Per-client throttling state
#[derive(Debug, Default, Clone, Copy)]
pub struct ThrottleState {
    /// When the last request was let through
    pub last_sent: Option<Instant>,
    /// Requests let through since the limiter was created
    pub sent: u64,
}

/// Interval + cap rate limiter.
///
/// `acquire` holds the state lock across the wait, so concurrent callers are
/// let through one at a time, in arrival order, each at least one interval
/// after the previous.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    state: Mutex<ThrottleState>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given config
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            config: config.clone(),
            state: Mutex::new(ThrottleState::default()),
        }
    }

    /// Create a limiter that never waits and never refuses
    pub fn unlimited() -> Self {
        Self::new(&RateLimiterConfig::unlimited())
    }

    /// The limiter's configuration
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }

    /// Wait for the next send slot and record it.
    ///
    /// Fails with `RequestLimitExceeded` once the cap is reached. Dropping
    /// the future while it waits leaves the state untouched.
    pub async fn acquire(&self) -> Result<()> {
        let interval = self.config.checked_interval()?;
        let mut state = self.state.lock().await;

        if let Some(limit) = self.config.limit() {
            if state.sent >= limit {
                return Err(Error::RequestLimitExceeded { limit });
            }
        }

        if let (Some(interval), Some(last)) = (interval, state.last_sent) {
            let next = last.checked_add(interval).ok_or_else(|| {
                Error::config(format!("throttle interval {interval:?} overflows the clock"))
            })?;
            let now = Instant::now();
            if next > now {
                let wait = next - now;
                if wait >= Duration::from_secs(1) {
                    warn!("Throttling: waiting {:?} before next request", wait);
                } else {
                    debug!("Throttling: waiting {:?} before next request", wait);
                }
                tokio::time::sleep_until(next).await;
            }
        }

        state.last_sent = Some(Instant::now());
        state.sent += 1;
        Ok(())
    }

    /// Number of requests let through so far
    pub async fn request_count(&self) -> u64 {
        self.state.lock().await.sent
    }

    /// Snapshot of the throttle state
    pub async fn state(&self) -> ThrottleState {
        *self.state.lock().await
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(&RateLimiterConfig::default())
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_rate_limiter_config_default() {
        let config = RateLimiterConfig::default();
        assert!((config.requests_per_second - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.max_requests, 0);
        assert_eq!(config.min_interval(), Some(Duration::from_millis(200)));
        assert_eq!(config.limit(), None);
    }

    #[test]
    fn test_rate_limiter_config_disabled() {
        let config = RateLimiterConfig::unlimited();
        assert_eq!(config.min_interval(), None);
        assert_eq!(config.limit(), None);
    }

    #[test]
    fn test_rate_limiter_config_fractional_rate() {
        let config = RateLimiterConfig::new(0.5, 0);
        assert_eq!(config.min_interval(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_rate_limiter_config_validate() {
        assert!(RateLimiterConfig::new(10.0, 0).validate().is_ok());
        assert!(RateLimiterConfig::new(0.0, 0).validate().is_ok());
        assert!(RateLimiterConfig::new(-1.0, 0).validate().is_err());
        assert!(RateLimiterConfig::new(f64::NAN, 0).validate().is_err());
        assert!(RateLimiterConfig::new(f64::INFINITY, 0).validate().is_err());
    }

    #[test]
    fn test_rate_limiter_config_validate_tiny_rates() {
        let once_a_day = RateLimiterConfig::new(1.0 / 86_400.0, 0);
        assert!(once_a_day.validate().is_ok());
        assert!(once_a_day.min_interval().is_some());

        for rps in [1e-9, 1e-19, 1e-20, f64::MIN_POSITIVE] {
            let config = RateLimiterConfig::new(rps, 0);
            assert!(
                matches!(config.validate(), Err(Error::Config { .. })),
                "rate {rps} should be rejected"
            );
            assert_eq!(config.min_interval(), None);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_acquire_does_not_wait() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1.0, 0));
        let start = Instant::now();
        limiter.acquire().await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_spaces_requests() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(5.0, 0));
        let mut sends = Vec::new();

        for _ in 0..4 {
            limiter.acquire().await.unwrap();
            sends.push(Instant::now());
        }

        for pair in sends.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(200));
        }
        assert_eq!(limiter.request_count().await, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_no_wait_after_idle() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(5.0, 0));
        limiter.acquire().await.unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;

        let start = Instant::now();
        limiter.acquire().await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unlimited_never_waits() {
        let limiter = RateLimiter::unlimited();
        let start = Instant::now();
        for _ in 0..100 {
            limiter.acquire().await.unwrap();
        }
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(limiter.request_count().await, 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_cap() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(0.0, 3));
        for _ in 0..3 {
            limiter.acquire().await.unwrap();
        }

        let err = limiter.acquire().await.unwrap_err();
        assert!(matches!(err, Error::RequestLimitExceeded { limit: 3 }));

        // Time passing does not reset the cap
        tokio::time::sleep(Duration::from_secs(3600)).await;
        assert!(limiter.acquire().await.is_err());
        assert_eq!(limiter.request_count().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_acquire_respects_interval() {
        let limiter = Arc::new(RateLimiter::new(&RateLimiterConfig::new(10.0, 0)));
        let start = Instant::now();

        let handles: Vec<_> = (0..5)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move {
                    limiter.acquire().await.unwrap();
                    Instant::now()
                })
            })
            .collect();

        let mut sends = Vec::new();
        for handle in handles {
            sends.push(handle.await.unwrap());
        }
        sends.sort();

        for pair in sends.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(100));
        }
        assert!(start.elapsed() >= Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_with_unrepresentable_rate_errors() {
        for rps in [1e-19, 1e-20] {
            let limiter = RateLimiter::new(&RateLimiterConfig::new(rps, 0));
            for _ in 0..2 {
                let err = limiter.acquire().await.unwrap_err();
                assert!(matches!(err, Error::Config { .. }));
            }
            assert_eq!(limiter.request_count().await, 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_acquire_leaves_state_untouched() {
        let limiter = RateLimiter::new(&RateLimiterConfig::new(1.0, 0));
        limiter.acquire().await.unwrap();

        let timed_out = tokio::time::timeout(Duration::from_millis(100), limiter.acquire()).await;
        assert!(timed_out.is_err());
        assert_eq!(limiter.request_count().await, 1);
    }
}
