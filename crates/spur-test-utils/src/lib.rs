//! Testing utilities for Spur workspace
//!
//! Shared fixtures and scripted generation backends.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::NaiveDate;
use spur_catalog::UserContext;
use spur_engine::{EngineConfig, GenerationBackend, GenerationError, PersonalizationEngine};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Alex, ten days in, mid-morning, half done
pub fn alex_context() -> UserContext {
    UserContext::new("Alex")
        .with_streak_days(10)
        .with_hour_of_day(9)
        .with_completion_rate(50.0)
}

/// A context no built-in template applies to
pub fn unmatched_context() -> UserContext {
    UserContext::new("Newcomer").with_hour_of_day(14)
}

/// Backend that answers every prompt the same way and counts calls
#[derive(Debug)]
pub struct ScriptedBackend {
    reply: Result<String, GenerationError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(GenerationError::backend(message)),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Replies with `text` after sleeping for `delay`
    pub fn slow(text: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}

pub fn engine_with(
    backend: Arc<ScriptedBackend>,
    per_minute: u32,
    per_hour: u32,
) -> PersonalizationEngine {
    let config = EngineConfig::default().with_rate_limits(per_minute, per_hour);
    PersonalizationEngine::new(config, backend)
}
