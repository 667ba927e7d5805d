//! Templates and their applicability rules
//!
//! A [`Template`] pairs a message pattern with an [`ApplicabilityRule`]. Rules
//! are plain conjunctions of optional bounds: an unset bound is vacuously true,
//! and a template either matches a context or it does not.

use crate::context::UserContext;
use crate::render::render;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coaching category a template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Early streak, keep the momentum going
    MomentumBuilder,
    /// Coming back after a broken streak
    ComebackCoach,
    /// The day is at risk
    RescueMotivator,
    /// Big numbers worth celebrating
    AchievementCelebrator,
    /// Long-running habits becoming identity
    IdentityReinforcer,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 5] = [
        Category::MomentumBuilder,
        Category::ComebackCoach,
        Category::RescueMotivator,
        Category::AchievementCelebrator,
        Category::IdentityReinforcer,
    ];

    /// Stable wire name
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::MomentumBuilder => "MOMENTUM_BUILDER",
            Category::ComebackCoach => "COMEBACK_COACH",
            Category::RescueMotivator => "RESCUE_MOTIVATOR",
            Category::AchievementCelebrator => "ACHIEVEMENT_CELEBRATOR",
            Category::IdentityReinforcer => "IDENTITY_REINFORCER",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conjunction of optional bounds over a [`UserContext`]
///
/// All bounds are inclusive. `requires_rescue` and `requires_broken_streak`
/// only constrain when set to `true`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicabilityRule {
    /// Minimum streak length in days
    pub min_streak_days: Option<u32>,
    /// Maximum streak length in days
    pub max_streak_days: Option<u32>,
    /// Earliest hour of day
    pub min_hour: Option<u8>,
    /// Latest hour of day
    pub max_hour: Option<u8>,
    /// Minimum completion rate percentage
    pub min_completion_rate: Option<f64>,
    /// Maximum completion rate percentage
    pub max_completion_rate: Option<f64>,
    /// Context must have `needs_rescue` set
    pub requires_rescue: bool,
    /// Context must have `has_broken_streak` set
    pub requires_broken_streak: bool,
}

impl ApplicabilityRule {
    /// Rule with no bounds; matches every context
    #[inline]
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// With inclusive streak bounds
    #[inline]
    #[must_use]
    pub fn streak_between(mut self, min: u32, max: u32) -> Self {
        self.min_streak_days = Some(min);
        self.max_streak_days = Some(max);
        self
    }

    /// With minimum streak
    #[inline]
    #[must_use]
    pub fn streak_at_least(mut self, min: u32) -> Self {
        self.min_streak_days = Some(min);
        self
    }

    /// With inclusive hour-of-day bounds
    #[inline]
    #[must_use]
    pub fn hours_between(mut self, min: u8, max: u8) -> Self {
        self.min_hour = Some(min);
        self.max_hour = Some(max);
        self
    }

    /// With inclusive completion-rate bounds
    #[inline]
    #[must_use]
    pub fn completion_between(mut self, min: f64, max: f64) -> Self {
        self.min_completion_rate = Some(min);
        self.max_completion_rate = Some(max);
        self
    }

    /// Require the rescue flag
    #[inline]
    #[must_use]
    pub fn requiring_rescue(mut self) -> Self {
        self.requires_rescue = true;
        self
    }

    /// Require the broken-streak flag
    #[inline]
    #[must_use]
    pub fn requiring_broken_streak(mut self) -> Self {
        self.requires_broken_streak = true;
        self
    }

    /// Check whether every set bound holds for `context`
    #[must_use]
    pub fn matches(&self, context: &UserContext) -> bool {
        within(context.current_streak_days, self.min_streak_days, self.max_streak_days)
            && within(context.hour_of_day, self.min_hour, self.max_hour)
            && within(
                context.completion_rate,
                self.min_completion_rate,
                self.max_completion_rate,
            )
            && (!self.requires_rescue || context.needs_rescue)
            && (!self.requires_broken_streak || context.has_broken_streak)
    }

    /// True when no bound is set
    #[inline]
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        *self == Self::default()
    }
}

fn within<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> bool {
    min.map_or(true, |lo| value >= lo) && max.map_or(true, |hi| value <= hi)
}

/// A motivational message pattern with its applicability rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Stable identifier
    pub id: String,
    /// Coaching category
    pub category: Category,
    /// Text with `{placeholder}` slots
    pub pattern: String,
    /// When this template applies
    pub rule: ApplicabilityRule,
}

impl Template {
    /// Create template
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        category: Category,
        pattern: impl Into<String>,
        rule: ApplicabilityRule,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            pattern: pattern.into(),
            rule,
        }
    }

    /// Check applicability against a context
    #[inline]
    #[must_use]
    pub fn matches(&self, context: &UserContext) -> bool {
        self.rule.matches(context)
    }

    /// Fill placeholders from a context
    #[inline]
    #[must_use]
    pub fn render(&self, context: &UserContext) -> String {
        render(&self.pattern, context)
    }
}
