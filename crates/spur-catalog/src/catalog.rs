//! Template catalog and context matching
//!
//! The catalog is built once and only ever read afterwards, so it can be
//! shared across tasks behind a plain reference or `Arc` with no locking.

use crate::context::UserContext;
use crate::template::{ApplicabilityRule, Category, Template};
use once_cell::sync::Lazy;
use std::sync::Arc;

static BUILTIN: Lazy<Arc<TemplateCatalog>> =
    Lazy::new(|| Arc::new(TemplateCatalog::with_defaults()));

/// Immutable, ordered set of templates
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Create catalog from templates (order is preserved and matters for selection)
    #[inline]
    #[must_use]
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// Process-wide built-in catalog
    #[inline]
    #[must_use]
    pub fn builtin() -> &'static TemplateCatalog {
        &BUILTIN
    }

    /// Shared handle to the built-in catalog (no copy)
    #[inline]
    #[must_use]
    pub fn shared() -> Arc<TemplateCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Build the default template set
    #[must_use]
    pub fn with_defaults() -> Self {
        use Category::{
            AchievementCelebrator, ComebackCoach, IdentityReinforcer, MomentumBuilder,
            RescueMotivator,
        };
        let any = ApplicabilityRule::any;

        Self::new(vec![
            // Momentum: first week
            Template::new(
                "momentum-morning",
                MomentumBuilder,
                "Good morning, {user_name}! Day {streak_days} is yours to take.",
                any().streak_between(1, 6).hours_between(5, 11),
            ),
            Template::new(
                "momentum-steady",
                MomentumBuilder,
                "{streak_days} days in, {user_name}. Small steps add up.",
                any().streak_between(1, 6).completion_between(0.0, 99.9),
            ),
            Template::new(
                "momentum-evening",
                MomentumBuilder,
                "Evening check-in: {completion_rate}% done today. Finish strong, {user_name}.",
                any().streak_between(1, 6).hours_between(17, 23),
            ),
            // Comeback
            Template::new(
                "comeback-day-one",
                ComebackCoach,
                "Every streak starts at day one, {user_name}. Today counts.",
                any().requiring_broken_streak(),
            ),
            Template::new(
                "comeback-restart",
                ComebackCoach,
                "Back at it with {streak_days} days. The comeback is the story.",
                any().requiring_broken_streak().streak_between(0, 3),
            ),
            // Rescue
            Template::new(
                "rescue-late",
                RescueMotivator,
                "It's {current_time}, {user_name}. There's still time to save the day.",
                any().requiring_rescue().hours_between(18, 23),
            ),
            Template::new(
                "rescue-one-habit",
                RescueMotivator,
                "Only {completion_rate}% so far. One habit is all it takes to keep the streak alive.",
                any().requiring_rescue().completion_between(0.0, 50.0),
            ),
            // Achievements
            Template::new(
                "achievement-perfect-day",
                AchievementCelebrator,
                "100% today, {user_name}! That's how it's done.",
                any().completion_between(100.0, 100.0),
            ),
            Template::new(
                "achievement-month",
                AchievementCelebrator,
                "{streak_days} days and {total_points} points. Look how far you've come.",
                any().streak_at_least(30),
            ),
            Template::new(
                "achievement-century",
                AchievementCelebrator,
                "Triple digits: {streak_days} days, {user_name}. Remarkable.",
                any().streak_at_least(100),
            ),
            // Identity
            Template::new(
                "identity-shows-up",
                IdentityReinforcer,
                "You're someone who shows up, {user_name}. {streak_days} days prove it.",
                any().streak_at_least(7),
            ),
            Template::new(
                "identity-morning",
                IdentityReinforcer,
                "Another morning, another rep. This is who you are now, {user_name}.",
                any().streak_at_least(7).hours_between(5, 11),
            ),
            Template::new(
                "identity-beyond-habit",
                IdentityReinforcer,
                "After {streak_days} days, this isn't a habit anymore. It's part of you.",
                any().streak_at_least(21),
            ),
        ])
    }

    /// Every template whose rule matches `context`, in catalog order
    ///
    /// Returns `None` when nothing matches so callers can fall back explicitly;
    /// a `Some` vector is never empty.
    #[must_use]
    pub fn match_context(&self, context: &UserContext) -> Option<Vec<&Template>> {
        let matched: Vec<&Template> = self
            .templates
            .iter()
            .filter(|t| t.matches(context))
            .collect();

        if matched.is_empty() {
            None
        } else {
            Some(matched)
        }
    }

    /// Look up a template by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Templates in one category
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Template> {
        self.templates.iter().filter(move |t| t.category == category)
    }

    /// All templates
    #[inline]
    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Number of templates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
