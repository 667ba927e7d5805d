//! Per-request user context
//!
//! A snapshot of the user's habit state as supplied by the caller. The engine
//! never queries or caches this data itself.

use serde::{Deserialize, Serialize};

/// Snapshot of a user's habit state at request time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    /// Display name, also used as the identity for daily seeding
    pub user_name: String,
    /// Current streak length in days
    pub current_streak_days: u32,
    /// Local hour of day (0-23)
    pub hour_of_day: u8,
    /// Percentage of today's habits completed (0.0-100.0)
    pub completion_rate: f64,
    /// The day is at risk and the user needs a push
    pub needs_rescue: bool,
    /// The user recently lost a streak
    pub has_broken_streak: bool,
    /// Lifetime accumulated points
    pub total_points: u64,
}

impl UserContext {
    /// Create context for a user with every other field zeroed
    #[inline]
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            current_streak_days: 0,
            hour_of_day: 0,
            completion_rate: 0.0,
            needs_rescue: false,
            has_broken_streak: false,
            total_points: 0,
        }
    }

    /// With streak length
    #[inline]
    #[must_use]
    pub fn with_streak_days(mut self, days: u32) -> Self {
        self.current_streak_days = days;
        self
    }

    /// With hour of day
    #[inline]
    #[must_use]
    pub fn with_hour_of_day(mut self, hour: u8) -> Self {
        self.hour_of_day = hour;
        self
    }

    /// With completion rate percentage
    #[inline]
    #[must_use]
    pub fn with_completion_rate(mut self, rate: f64) -> Self {
        self.completion_rate = rate;
        self
    }

    /// With rescue flag
    #[inline]
    #[must_use]
    pub fn with_needs_rescue(mut self, needs_rescue: bool) -> Self {
        self.needs_rescue = needs_rescue;
        self
    }

    /// With broken-streak flag
    #[inline]
    #[must_use]
    pub fn with_broken_streak(mut self, broken: bool) -> Self {
        self.has_broken_streak = broken;
        self
    }

    /// With lifetime points
    #[inline]
    #[must_use]
    pub fn with_total_points(mut self, points: u64) -> Self {
        self.total_points = points;
        self
    }
}
