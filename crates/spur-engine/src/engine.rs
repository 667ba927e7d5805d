//! Personalization Engine
//!
//! Decides, per request, between three sources of text:
//! - a cached generation still inside its TTL
//! - a fresh generation, if the rate limiter admits the call
//! - a deterministic template, or the fixed default when nothing matches
//!
//! The engine owns its cache and limiter; both are safe to share, so a single
//! engine behind an `Arc` serves any number of concurrent callers.

use crate::backend::GenerationBackend;
use crate::config::EngineConfig;
use crate::content::{ContentKind, ContentSource, PersonalizedContent};
use crate::error::{ConfigResult, GenerationError, PersonalizationError};
use crate::prompt::build_prompt;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spur_cache::{CacheStats, ResponseCache};
use spur_catalog::{select, Template, TemplateCatalog, UserContext};
use spur_limiter::{RateLimiter, UsageStats};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Combined observability snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Response cache size and hit statistics
    pub cache: CacheStats,
    /// Rate limiter window usage
    pub usage: UsageStats,
}

/// The orchestrator
pub struct PersonalizationEngine {
    /// Configuration
    config: EngineConfig,
    /// Read-only template set
    catalog: Arc<TemplateCatalog>,
    /// Generated content, keyed by kind and date
    cache: ResponseCache<String>,
    /// Guards backend call budget
    limiter: RateLimiter,
    /// External generator
    backend: Arc<dyn GenerationBackend>,
}

impl PersonalizationEngine {
    /// Create engine over the built-in catalog with an empty cache
    ///
    /// The config is used as given; see [`Self::try_new`] for a validating
    /// constructor.
    #[must_use]
    pub fn new(config: EngineConfig, backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            limiter: RateLimiter::new(config.rate_limiter_config()),
            config,
            catalog: TemplateCatalog::shared(),
            cache: ResponseCache::new(),
            backend,
        }
    }

    /// Create engine after validating `config`
    ///
    /// # Errors
    /// `ConfigError::Invalid` if [`EngineConfig::validate`] rejects the config
    pub fn try_new(
        config: EngineConfig,
        backend: Arc<dyn GenerationBackend>,
    ) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::new(config, backend))
    }

    /// With a custom template catalog
    #[inline]
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<TemplateCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// With a pre-populated cache
    #[inline]
    #[must_use]
    pub fn with_cache(mut self, cache: ResponseCache<String>) -> Self {
        self.cache = cache;
        self
    }

    /// Today's daily quote for a user
    ///
    /// This is the call the UI makes. It never fails and only waits for the
    /// bounded rate-limiter delay plus the configured backend timeout.
    pub async fn personalized_content(&self, context: &UserContext) -> String {
        self.resolve(ContentKind::DailyQuote, context, today())
            .await
            .text
    }

    /// Today's coaching insight for a user
    pub async fn coaching_insight(&self, context: &UserContext) -> String {
        self.resolve(ContentKind::CoachingInsight, context, today())
            .await
            .text
    }

    /// Resolve content for an explicit date, reporting where it came from
    ///
    /// # Workflow
    /// 1. Serve an unexpired cache entry for the kind's key
    /// 2. Otherwise ask the rate limiter for a permit
    /// 3. If admitted, call the backend under timeout and cache a success
    /// 4. On denial or any generation failure, fall back to templates
    ///
    /// Two concurrent misses on the same key may both reach the backend; the
    /// later result overwrites the earlier one.
    pub async fn resolve(
        &self,
        kind: ContentKind,
        context: &UserContext,
        date: NaiveDate,
    ) -> PersonalizedContent {
        let key = kind.cache_key(context, date);

        if let Some(text) = self.cache.get(&key) {
            tracing::debug!(%kind, key = %key, "serving cached content");
            return PersonalizedContent::cached(text);
        }

        match self.generate(kind, context).await {
            Ok(text) => {
                tracing::info!(%kind, key = %key, "generated fresh content");
                self.cache.put(key, text.clone(), kind.ttl(&self.config));
                PersonalizedContent::generated(text)
            }
            Err(err) => {
                if err.reached_backend() {
                    tracing::warn!(%kind, error = %err, "generation failed, using templates");
                } else {
                    tracing::info!(%kind, error = %err, "generation skipped, using templates");
                }
                self.template_content(context, date)
            }
        }
    }

    /// Deterministic template path, with the fixed default as last resort
    #[must_use]
    pub fn template_content(&self, context: &UserContext, date: NaiveDate) -> PersonalizedContent {
        match self.pick_template(context, date) {
            Ok(template) => {
                let text = template.render(context);
                if text.trim().is_empty() {
                    tracing::warn!(template = %template.id, "template rendered empty text");
                    return PersonalizedContent::default_message();
                }
                PersonalizedContent {
                    text,
                    source: ContentSource::Template {
                        id: template.id.clone(),
                        category: template.category,
                    },
                }
            }
            Err(err) => {
                tracing::debug!(user = %context.user_name, error = %err, "serving default message");
                PersonalizedContent::default_message()
            }
        }
    }

    fn pick_template(
        &self,
        context: &UserContext,
        date: NaiveDate,
    ) -> Result<&Template, PersonalizationError> {
        let candidates = self
            .catalog
            .match_context(context)
            .ok_or(PersonalizationError::NoTemplateMatch)?;
        Ok(*select(&candidates, date, &context.user_name))
    }

    async fn generate(
        &self,
        kind: ContentKind,
        context: &UserContext,
    ) -> Result<String, PersonalizationError> {
        if !self.limiter.acquire_permit().await {
            return Err(PersonalizationError::QuotaExceeded);
        }

        let prompt = build_prompt(kind, context);
        let timeout = self.config.generation_timeout();

        let text = tokio::time::timeout(timeout, self.backend.generate(&prompt))
            .await
            .map_err(|_| GenerationError::Timeout { after: timeout })??;

        let text = text.trim();
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse.into());
        }
        Ok(text.to_string())
    }

    /// Remove expired cache entries; returns how many were removed
    pub fn sweep_cache(&self) -> usize {
        self.cache.sweep()
    }

    /// Drop a cached entry so the next request regenerates it
    pub fn invalidate(&self, kind: ContentKind, context: &UserContext, date: NaiveDate) -> bool {
        self.cache.invalidate(&kind.cache_key(context, date))
    }

    /// Periodically sweep the cache until the engine is dropped
    ///
    /// The task holds only a weak reference, so it never keeps the engine alive.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn_sweeper(self: &Arc<Self>) -> JoinHandle<()> {
        let engine = Arc::downgrade(self);
        let period = self.config.sweep_interval().max(Duration::from_millis(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // First tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(engine) = engine.upgrade() else {
                    tracing::debug!("engine dropped, stopping cache sweeper");
                    break;
                };
                engine.sweep_cache();
            }
        })
    }

    /// Rate limiter usage
    #[must_use]
    pub fn usage_stats(&self) -> UsageStats {
        self.limiter.usage_stats()
    }

    /// Cache size and hit statistics
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Both statistics at once
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            cache: self.cache_stats(),
            usage: self.usage_stats(),
        }
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get template catalog
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }
}

impl std::fmt::Debug for PersonalizationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonalizationEngine")
            .field("config", &self.config)
            .field("templates", &self.catalog.len())
            .field("cache", &self.cache.stats())
            .field("usage", &self.limiter.usage_stats())
            .finish_non_exhaustive()
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
