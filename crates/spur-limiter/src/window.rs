//! Sliding-window bookkeeping
//!
//! [`RateWindow`] is the synchronous core of the limiter: it owns the ordered
//! timestamp log and makes admission decisions for an explicit `now`. It never
//! sleeps, which keeps it testable with arbitrary clocks.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Length of the short window
pub const MINUTE: Duration = Duration::from_secs(60);

/// Length of the long window
pub const HOUR: Duration = Duration::from_secs(3600);

/// Window limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Maximum admissions in any trailing 60s (at least 1)
    pub per_minute: u32,
    /// Maximum admissions in any trailing 3600s
    pub per_hour: u32,
}

impl RateLimiterConfig {
    /// Create config; a zero per-minute limit is raised to 1
    #[inline]
    #[must_use]
    pub fn new(per_minute: u32, per_hour: u32) -> Self {
        Self {
            per_minute: per_minute.max(1),
            per_hour,
        }
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(10, 100)
    }
}

/// Outcome of a single admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Permit granted and recorded
    Admitted,
    /// Minute window full; check again after the delay
    Wait(Duration),
    /// Hourly quota exhausted
    Denied,
}

/// Usage snapshot computed from the pruned window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Admissions in the trailing minute
    pub requests_last_minute: u32,
    /// Admissions in the trailing hour
    pub requests_last_hour: u32,
    /// Admissions since creation (or last reset)
    pub total_requests: u64,
    /// Permits left in the minute window
    pub remaining_minute: u32,
    /// Permits left in the hour window
    pub remaining_hour: u32,
}

/// Ordered log of admission timestamps with minute/hour limits
#[derive(Debug, Clone)]
pub struct RateWindow {
    config: RateLimiterConfig,
    /// Chronological; entries older than an hour are pruned lazily
    timestamps: VecDeque<Instant>,
    total_admitted: u64,
}

impl RateWindow {
    /// Create empty window
    #[must_use]
    pub fn new(config: RateLimiterConfig) -> Self {
        let config = RateLimiterConfig::new(config.per_minute, config.per_hour);
        Self {
            config,
            timestamps: VecDeque::with_capacity((config.per_hour as usize).min(1024)),
            total_admitted: 0,
        }
    }

    /// Drop timestamps that have left the hour window
    pub fn prune(&mut self, now: Instant) {
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) >= HOUR {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
    }

    /// Decide without recording
    pub fn check(&mut self, now: Instant) -> Admission {
        self.prune(now);

        if self.hour_count() >= self.config.per_hour as usize {
            return Admission::Denied;
        }

        let in_minute = self.minute_count(now);
        let per_minute = self.config.per_minute as usize;
        if in_minute >= per_minute {
            // The entry whose expiry brings the minute count below the limit.
            let blocking = self.timestamps[self.timestamps.len() - per_minute];
            let waited = now.saturating_duration_since(blocking);
            return Admission::Wait(MINUTE.saturating_sub(waited));
        }

        Admission::Admitted
    }

    /// Decide, recording `now` if admitted
    pub fn admit(&mut self, now: Instant) -> Admission {
        let decision = self.check(now);
        if decision == Admission::Admitted {
            self.timestamps.push_back(now);
            self.total_admitted += 1;
        }
        decision
    }

    /// Usage as of `now`
    pub fn usage(&mut self, now: Instant) -> UsageStats {
        self.prune(now);
        let minute = saturating_u32(self.minute_count(now));
        let hour = saturating_u32(self.hour_count());

        UsageStats {
            requests_last_minute: minute,
            requests_last_hour: hour,
            total_requests: self.total_admitted,
            remaining_minute: self.config.per_minute.saturating_sub(minute),
            remaining_hour: self.config.per_hour.saturating_sub(hour),
        }
    }

    /// Forget every recorded admission
    pub fn reset(&mut self) {
        self.timestamps.clear();
        self.total_admitted = 0;
    }

    /// Active limits
    #[inline]
    #[must_use]
    pub fn config(&self) -> RateLimiterConfig {
        self.config
    }

    fn hour_count(&self) -> usize {
        self.timestamps.len()
    }

    fn minute_count(&self, now: Instant) -> usize {
        self.timestamps
            .iter()
            .rev()
            .take_while(|&&t| now.saturating_duration_since(t) < MINUTE)
            .count()
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn admits_up_to_minute_limit_then_waits() {
        let mut window = RateWindow::new(RateLimiterConfig::new(3, 100));
        let t0 = Instant::now();

        for _ in 0..3 {
            assert_eq!(window.admit(t0), Admission::Admitted);
        }
        assert_eq!(window.admit(t0 + secs(20)), Admission::Wait(secs(40)));
        assert_eq!(window.admit(t0 + secs(60)), Admission::Admitted);
    }

    #[test]
    fn wait_targets_oldest_in_minute() {
        let mut window = RateWindow::new(RateLimiterConfig::new(2, 100));
        let t0 = Instant::now();

        assert_eq!(window.admit(t0), Admission::Admitted);
        assert_eq!(window.admit(t0 + secs(30)), Admission::Admitted);
        assert_eq!(window.check(t0 + secs(45)), Admission::Wait(secs(15)));

        // After the first leaves, only one slot frees up.
        assert_eq!(window.admit(t0 + secs(60)), Admission::Admitted);
        assert_eq!(window.check(t0 + secs(61)), Admission::Wait(secs(29)));
    }

    #[test]
    fn hourly_limit_denies_without_waiting() {
        let mut window = RateWindow::new(RateLimiterConfig::new(10, 2));
        let t0 = Instant::now();

        assert_eq!(window.admit(t0), Admission::Admitted);
        assert_eq!(window.admit(t0 + secs(1)), Admission::Admitted);
        assert_eq!(window.admit(t0 + secs(2)), Admission::Denied);
        assert_eq!(window.admit(t0 + secs(3599)), Admission::Denied);
        assert_eq!(window.admit(t0 + secs(3600)), Admission::Admitted);
    }

    #[test]
    fn prune_drops_hour_old_entries() {
        let mut window = RateWindow::new(RateLimiterConfig::new(10, 100));
        let t0 = Instant::now();
        window.admit(t0);
        window.admit(t0 + secs(1800));

        let usage = window.usage(t0 + secs(3600));
        assert_eq!(usage.requests_last_hour, 1);
        assert_eq!(usage.requests_last_minute, 0);
        assert_eq!(usage.total_requests, 2);
    }

    #[test]
    fn usage_reports_remaining() {
        let mut window = RateWindow::new(RateLimiterConfig::new(5, 20));
        let t0 = Instant::now();
        for i in 0..3 {
            window.admit(t0 + secs(i));
        }

        let usage = window.usage(t0 + secs(10));
        assert_eq!(
            usage,
            UsageStats {
                requests_last_minute: 3,
                requests_last_hour: 3,
                total_requests: 3,
                remaining_minute: 2,
                remaining_hour: 17,
            }
        );
    }

    #[test]
    fn check_does_not_record() {
        let mut window = RateWindow::new(RateLimiterConfig::new(1, 1));
        let t0 = Instant::now();
        assert_eq!(window.check(t0), Admission::Admitted);
        assert_eq!(window.check(t0), Admission::Admitted);
        assert_eq!(window.usage(t0).total_requests, 0);
    }

    #[test]
    fn zero_per_minute_is_raised() {
        let window = RateWindow::new(RateLimiterConfig {
            per_minute: 0,
            per_hour: 5,
        });
        assert_eq!(window.config().per_minute, 1);
    }

    #[test]
    fn zero_per_hour_always_denies() {
        let mut window = RateWindow::new(RateLimiterConfig::new(1, 0));
        assert_eq!(window.admit(Instant::now()), Admission::Denied);
    }

    #[test]
    fn reset_clears_history() {
        let mut window = RateWindow::new(RateLimiterConfig::new(1, 1));
        let t0 = Instant::now();
        window.admit(t0);
        assert_eq!(window.admit(t0), Admission::Denied);

        window.reset();
        assert_eq!(window.admit(t0), Admission::Admitted);
    }
}
