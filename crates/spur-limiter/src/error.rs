//! Error types for admission control

use std::time::Duration;

/// Reasons a permit was not granted immediately
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    /// Hourly quota used up; waiting inside one call will not help
    #[error("hourly quota of {limit} requests exhausted")]
    QuotaExhausted {
        /// Configured per-hour limit
        limit: u32,
    },

    /// Per-minute window full; a permit frees up after `retry_after`
    #[error("per-minute limit reached, retry after {}ms", .retry_after.as_millis())]
    Throttled {
        /// Time until the oldest request leaves the minute window
        retry_after: Duration,
    },
}

impl RateLimitError {
    /// Check if waiting would eventually succeed within the current hour
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Throttled { .. })
    }
}
