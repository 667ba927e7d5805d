//! Every request yields displayable text, whatever the backend does
//!
//! Run with: cargo test --package spur-engine --test fallback_totality

use proptest::prelude::*;
use spur_catalog::{Template, TemplateCatalog};
use spur_engine::prelude::*;
use spur_engine::{ContentSource, DEFAULT_MESSAGE};
use spur_test_utils::{day, engine_with, ScriptedBackend};
use std::future::Future;
use std::sync::Arc;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
        .block_on(future)
}

fn arb_context() -> impl Strategy<Value = UserContext> {
    (
        "[A-Za-z]{0,12}",
        0u32..500,
        0u8..24,
        0.0f64..=100.0,
        any::<bool>(),
        any::<bool>(),
        0u64..20_000,
    )
        .prop_map(|(name, streak, hour, rate, rescue, broken, points)| {
            UserContext::new(name)
                .with_streak_days(streak)
                .with_hour_of_day(hour)
                .with_completion_rate(rate)
                .with_needs_rescue(rescue)
                .with_broken_streak(broken)
                .with_total_points(points)
        })
}

fn arb_kind() -> impl Strategy<Value = ContentKind> {
    prop_oneof![Just(ContentKind::DailyQuote), Just(ContentKind::CoachingInsight)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn denied_quota_still_returns_text(context in arb_context(), kind in arb_kind()) {
        let backend = ScriptedBackend::replying("never used");
        let engine = engine_with(backend.clone(), 10, 0);

        let content = block_on(engine.resolve(kind, &context, day(2024, 6, 1)));

        prop_assert!(!content.text.trim().is_empty());
        prop_assert!(!content.is_ai());
        prop_assert_eq!(backend.calls(), 0);
    }

    #[test]
    fn failing_backend_still_returns_text(context in arb_context(), kind in arb_kind()) {
        let backend = ScriptedBackend::failing("unavailable");
        let engine = engine_with(backend, 10, 100);

        let content = block_on(engine.resolve(kind, &context, day(2024, 6, 1)));

        prop_assert!(!content.text.trim().is_empty());
        prop_assert_eq!(engine.cache_stats().entries, 0);
    }

    #[test]
    fn fallback_agrees_with_catalog(context in arb_context()) {
        let engine = engine_with(ScriptedBackend::failing("down"), 10, 0);
        let matched = TemplateCatalog::builtin().match_context(&context);

        let content = engine.template_content(&context, day(2024, 6, 1));

        match (matched, &content.source) {
            (None, ContentSource::Default) => prop_assert_eq!(content.text.as_str(), DEFAULT_MESSAGE),
            (Some(candidates), ContentSource::Template { id, .. }) => {
                prop_assert!(candidates.iter().any(|t| &t.id == id));
            }
            (matched, source) => {
                prop_assert!(false, "matched {:?} but served {:?}", matched.map(|c| c.len()), source);
            }
        }
    }

    #[test]
    fn fallback_is_stable_within_a_day(context in arb_context(), d in 1u32..=28) {
        let engine = engine_with(ScriptedBackend::failing("down"), 10, 0);
        let date = day(2024, 2, d);

        let first = engine.template_content(&context, date);
        let second = engine.template_content(&context, date);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn empty_catalog_serves_default(context in arb_context(), kind in arb_kind()) {
        let engine = engine_with(ScriptedBackend::failing("down"), 10, 100)
            .with_catalog(Arc::new(TemplateCatalog::new(Vec::<Template>::new())));

        let content = block_on(engine.resolve(kind, &context, day(2024, 6, 1)));

        prop_assert_eq!(content, PersonalizedContent::default_message());
    }
}
