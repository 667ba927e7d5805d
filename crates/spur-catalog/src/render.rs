//! Placeholder substitution
//!
//! Fixed set of named slots; anything else in braces is left untouched.

use crate::context::UserContext;

/// Placeholder names understood by [`render`]
pub const PLACEHOLDERS: [&str; 5] = [
    "{user_name}",
    "{streak_days}",
    "{completion_rate}",
    "{total_points}",
    "{current_time}",
];

/// Substitute context values into `pattern`
///
/// Completion rate is rounded to a whole percentage and the current time is
/// rendered as `HH:00` from the context's hour of day. Substitution is a single
/// left-to-right pass, so braces inside substituted values are never expanded.
#[must_use]
pub fn render(pattern: &str, context: &UserContext) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        rest = &rest[open..];

        match PLACEHOLDERS.iter().find(|p| rest.starts_with(**p)) {
            Some(placeholder) => {
                out.push_str(&value_of(placeholder, context));
                rest = &rest[placeholder.len()..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn value_of(placeholder: &str, context: &UserContext) -> String {
    match placeholder {
        "{user_name}" => context.user_name.clone(),
        "{streak_days}" => context.current_streak_days.to_string(),
        "{completion_rate}" => format!("{:.0}", context.completion_rate),
        "{total_points}" => context.total_points.to_string(),
        "{current_time}" => format!("{:02}:00", context.hour_of_day),
        _ => placeholder.to_string(),
    }
}
