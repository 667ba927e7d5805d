//! Engine configuration
//!
//! Durations are stored as whole milliseconds so sub-second timeouts survive
//! the round trip through TOML. Missing keys take their defaults.

use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use spur_limiter::RateLimiterConfig;
use std::path::Path;
use std::time::Duration;

/// Personalization engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Generation calls allowed per trailing minute
    pub per_minute_limit: u32,
    /// Generation calls allowed per trailing hour
    pub per_hour_limit: u32,
    /// Timeout around a single backend call, in milliseconds
    pub generation_timeout_ms: u64,
    /// TTL for cached daily quotes, in milliseconds
    pub daily_quote_ttl_ms: u64,
    /// TTL for cached coaching insights, in milliseconds
    pub coaching_insight_ttl_ms: u64,
    /// Period of the background cache sweep, in milliseconds
    pub sweep_interval_ms: u64,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With rate limits
    #[inline]
    #[must_use]
    pub fn with_rate_limits(mut self, per_minute: u32, per_hour: u32) -> Self {
        self.per_minute_limit = per_minute;
        self.per_hour_limit = per_hour;
        self
    }

    /// With backend timeout
    #[inline]
    #[must_use]
    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout_ms = millis(timeout);
        self
    }

    /// With daily quote TTL
    #[inline]
    #[must_use]
    pub fn with_daily_quote_ttl(mut self, ttl: Duration) -> Self {
        self.daily_quote_ttl_ms = millis(ttl);
        self
    }

    /// With coaching insight TTL
    #[inline]
    #[must_use]
    pub fn with_coaching_insight_ttl(mut self, ttl: Duration) -> Self {
        self.coaching_insight_ttl_ms = millis(ttl);
        self
    }

    /// With sweep interval
    #[inline]
    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval_ms = millis(interval);
        self
    }

    /// Limits for the rate limiter
    #[inline]
    #[must_use]
    pub fn rate_limiter_config(&self) -> RateLimiterConfig {
        RateLimiterConfig::new(self.per_minute_limit, self.per_hour_limit)
    }

    /// Backend timeout
    #[inline]
    #[must_use]
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_millis(self.generation_timeout_ms)
    }

    /// Daily quote TTL
    #[inline]
    #[must_use]
    pub fn daily_quote_ttl(&self) -> Duration {
        Duration::from_millis(self.daily_quote_ttl_ms)
    }

    /// Coaching insight TTL
    #[inline]
    #[must_use]
    pub fn coaching_insight_ttl(&self) -> Duration {
        Duration::from_millis(self.coaching_insight_ttl_ms)
    }

    /// Sweep period
    #[inline]
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }

    /// Reject values the engine cannot run with
    ///
    /// # Errors
    /// `ConfigError::Invalid` naming the first offending field
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("per_minute_limit", u64::from(self.per_minute_limit)),
            ("generation_timeout_ms", self.generation_timeout_ms),
            ("daily_quote_ttl_ms", self.daily_quote_ttl_ms),
            ("coaching_insight_ttl_ms", self.coaching_insight_ttl_ms),
            ("sweep_interval_ms", self.sweep_interval_ms),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{field} must be at least 1")));
            }
        }

        if self.per_minute_limit > self.per_hour_limit && self.per_hour_limit > 0 {
            tracing::warn!(
                per_minute = self.per_minute_limit,
                per_hour = self.per_hour_limit,
                "per-minute limit exceeds per-hour limit; hourly quota dominates"
            );
        }
        Ok(())
    }

    /// Parse and validate TOML
    ///
    /// # Errors
    /// `ConfigError::Parse` on malformed input, `ConfigError::Invalid` on bad values
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as [`Self::from_toml_str`]
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let input =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&input)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            per_minute_limit: 10,
            per_hour_limit: 100,
            generation_timeout_ms: 30_000,
            daily_quote_ttl_ms: 24 * 60 * 60 * 1000,
            coaching_insight_ttl_ms: 6 * 60 * 60 * 1000,
            sweep_interval_ms: 300_000,
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
