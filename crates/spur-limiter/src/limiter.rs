//! Async rate limiter guarding the generation backend
//!
//! Minute-level pressure is smoothed by suspending the caller; hour-level
//! exhaustion is reported immediately so the caller can fall back.

use crate::error::RateLimitError;
use crate::window::{Admission, RateLimiterConfig, RateWindow, UsageStats};
use parking_lot::Mutex;
use tokio::time::Instant;

/// Sliding-window limiter over a per-minute and a per-hour budget
///
/// Admission decisions are serialized through an internal mutex that is never
/// held across a suspension point. Dropping an `acquire_permit` future while
/// it waits records nothing.
#[derive(Debug)]
pub struct RateLimiter {
    window: Mutex<RateWindow>,
}

impl RateLimiter {
    /// Create limiter with the given limits
    #[inline]
    #[must_use]
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            window: Mutex::new(RateWindow::new(config)),
        }
    }

    /// Acquire a permit, waiting out minute-level throttling
    ///
    /// Returns `true` once a permit is recorded, or `false` as soon as the
    /// hourly quota is found exhausted. Each wait is bounded by the time until
    /// the blocking timestamp leaves the minute window.
    pub async fn acquire_permit(&self) -> bool {
        loop {
            let decision = self.window.lock().admit(Instant::now());
            match decision {
                Admission::Admitted => return true,
                Admission::Denied => {
                    tracing::warn!("hourly generation quota exhausted");
                    return false;
                }
                Admission::Wait(delay) => {
                    tracing::debug!(?delay, "throttling generation request");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Acquire a permit without waiting
    ///
    /// # Errors
    /// - [`RateLimitError::QuotaExhausted`] if the hourly budget is used up
    /// - [`RateLimitError::Throttled`] if the minute window is full
    pub fn try_acquire(&self) -> Result<(), RateLimitError> {
        let mut window = self.window.lock();
        match window.admit(Instant::now()) {
            Admission::Admitted => Ok(()),
            Admission::Denied => Err(RateLimitError::QuotaExhausted {
                limit: window.config().per_hour,
            }),
            Admission::Wait(retry_after) => Err(RateLimitError::Throttled { retry_after }),
        }
    }

    /// Current usage in both windows
    #[must_use]
    pub fn usage_stats(&self) -> UsageStats {
        self.window.lock().usage(Instant::now())
    }

    /// Active limits
    #[inline]
    #[must_use]
    pub fn config(&self) -> RateLimiterConfig {
        self.window.lock().config()
    }

    /// Forget all recorded admissions
    pub fn reset(&self) {
        self.window.lock().reset();
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimiterConfig::default())
    }
}
