//! Sliding-window bounds hold after any admission sequence
//!
//! Run with: cargo test --package spur-limiter --test window_invariant

use proptest::prelude::*;
use spur_limiter::{Admission, RateLimiterConfig, RateWindow, HOUR, MINUTE};
use std::time::Duration;
use tokio::time::Instant;

/// Count recorded admissions in the trailing `span` ending at `now`.
fn admitted_within(log: &[Instant], now: Instant, span: Duration) -> usize {
    log.iter()
        .filter(|&&t| now.saturating_duration_since(t) < span)
        .count()
}

proptest! {
    #[test]
    fn prop_windows_never_exceed_limits(
        per_minute in 1u32..8,
        per_hour in 0u32..40,
        gaps_ms in proptest::collection::vec(0u64..90_000, 1..120),
    ) {
        let mut window = RateWindow::new(RateLimiterConfig::new(per_minute, per_hour));
        let mut now = Instant::now();
        let mut log = Vec::new();

        for gap in gaps_ms {
            now += Duration::from_millis(gap);

            let mut decision = window.admit(now);
            if let Admission::Wait(delay) = decision {
                prop_assert!(delay <= MINUTE);
                now += delay;
                decision = window.admit(now);
                prop_assert!(!matches!(decision, Admission::Wait(_)));
            }

            if decision == Admission::Admitted {
                log.push(now);
            }

            prop_assert!(admitted_within(&log, now, MINUTE) <= per_minute as usize);
            prop_assert!(admitted_within(&log, now, HOUR) <= per_hour as usize);

            let usage = window.usage(now);
            prop_assert_eq!(usage.requests_last_minute as usize, admitted_within(&log, now, MINUTE));
            prop_assert_eq!(usage.requests_last_hour as usize, admitted_within(&log, now, HOUR));
            prop_assert_eq!(usage.total_requests, log.len() as u64);
        }
    }

    #[test]
    fn prop_denial_only_when_hour_is_full(
        per_hour in 1u32..10,
        gaps_s in proptest::collection::vec(61u64..600, 1..40),
    ) {
        // Gaps over a minute mean the minute window never blocks.
        let mut window = RateWindow::new(RateLimiterConfig::new(1, per_hour));
        let mut now = Instant::now();
        let mut log = Vec::new();

        for gap in gaps_s {
            now += Duration::from_secs(gap);
            let in_hour = admitted_within(&log, now, HOUR);
            match window.admit(now) {
                Admission::Admitted => {
                    prop_assert!(in_hour < per_hour as usize);
                    log.push(now);
                }
                Admission::Denied => prop_assert_eq!(in_hour, per_hour as usize),
                Admission::Wait(_) => prop_assert!(false, "minute window should be clear"),
            }
        }
    }
}
