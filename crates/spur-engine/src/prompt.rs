//! Prompt assembly for the generation backend

use crate::content::ContentKind;
use spur_catalog::UserContext;
use std::fmt::Write;

/// Prompt for the daily quote
///
/// The quote is cached once per day for every user, so nothing about the
/// requesting user goes into it.
pub const DAILY_QUOTE_PROMPT: &str =
    "Write one short motivational quote for a habit tracker's daily screen.";

/// Build the backend prompt for a request
#[must_use]
pub fn build_prompt(kind: ContentKind, context: &UserContext) -> String {
    match kind {
        ContentKind::DailyQuote => DAILY_QUOTE_PROMPT.to_string(),
        ContentKind::CoachingInsight => insight_prompt(context),
    }
}

fn insight_prompt(context: &UserContext) -> String {
    let mut prompt = format!(
        "Write one short, personal coaching insight for {}.",
        context.user_name
    );
    let _ = write!(
        prompt,
        " Current streak: {} days. Completed today: {:.0}%. Total points: {}. Local hour: {:02}.",
        context.current_streak_days,
        context.completion_rate,
        context.total_points,
        context.hour_of_day,
    );
    if context.needs_rescue {
        prompt.push_str(" Today's streak is at risk.");
    }
    if context.has_broken_streak {
        prompt.push_str(" They recently broke a streak.");
    }
    prompt
}
