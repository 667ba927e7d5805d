//! Content kinds and result provenance

use crate::config::EngineConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spur_catalog::{Category, UserContext};
use std::fmt;
use std::time::Duration;

/// Fixed text served when no template applies
pub const DEFAULT_MESSAGE: &str = "Every day is a fresh start. Keep showing up.";

/// What kind of content is requested; decides cache key and TTL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// One quote per calendar day, shared by all users
    DailyQuote,
    /// Per-user coaching insight, refreshed a few times a day
    CoachingInsight,
}

impl ContentKind {
    /// Cache key for this kind on `date`
    ///
    /// Daily quotes key on the date alone (`quote-2024-06-01`); insights also
    /// key on the user (`insight-Alex-2024-06-01`).
    #[must_use]
    pub fn cache_key(&self, context: &UserContext, date: NaiveDate) -> String {
        match self {
            ContentKind::DailyQuote => format!("quote-{date}"),
            ContentKind::CoachingInsight => format!("insight-{}-{date}", context.user_name),
        }
    }

    /// TTL to cache generated content of this kind
    #[inline]
    #[must_use]
    pub fn ttl(&self, config: &EngineConfig) -> Duration {
        match self {
            ContentKind::DailyQuote => config.daily_quote_ttl(),
            ContentKind::CoachingInsight => config.coaching_insight_ttl(),
        }
    }

    /// Stable name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ContentKind::DailyQuote => "daily_quote",
            ContentKind::CoachingInsight => "coaching_insight",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a piece of content came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ContentSource {
    /// Unexpired cached generation
    Cached,
    /// Fresh backend generation
    Generated,
    /// Deterministic template selection
    Template {
        /// Template id
        id: String,
        /// Template category
        category: Category,
    },
    /// Hardcoded default
    Default,
}

/// Text plus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedContent {
    /// Displayable text, never empty
    pub text: String,
    /// How it was produced
    pub source: ContentSource,
}

impl PersonalizedContent {
    /// Content served from cache
    #[inline]
    #[must_use]
    pub fn cached(text: String) -> Self {
        Self {
            text,
            source: ContentSource::Cached,
        }
    }

    /// Content fresh from the backend
    #[inline]
    #[must_use]
    pub fn generated(text: String) -> Self {
        Self {
            text,
            source: ContentSource::Generated,
        }
    }

    /// The hardcoded default
    #[inline]
    #[must_use]
    pub fn default_message() -> Self {
        Self {
            text: DEFAULT_MESSAGE.to_string(),
            source: ContentSource::Default,
        }
    }

    /// Check if produced by the generative path (fresh or cached)
    #[inline]
    #[must_use]
    pub fn is_ai(&self) -> bool {
        matches!(self.source, ContentSource::Cached | ContentSource::Generated)
    }
}
