//! Spur Personalization Engine
//!
//! Chooses the motivational text shown to a user. Generative content is
//! preferred, bounded by a sliding-window quota and reused through a TTL
//! cache; deterministic templates take over whenever generation is
//! unavailable, so the caller always gets displayable text.
//!
//! # Architecture
//!
//! ```text
//! caller → PersonalizationEngine ─┬→ ResponseCache        (hit → serve cached)
//!                                 ├→ RateLimiter          (deny → fallback)
//!                                 ├→ GenerationBackend    (fail/timeout → fallback)
//!                                 └→ TemplateCatalog → select → render   (fallback)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use spur_engine::{EngineConfig, OfflineBackend, PersonalizationEngine};
//! use spur_catalog::UserContext;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let engine = Arc::new(PersonalizationEngine::new(
//!     EngineConfig::default(),
//!     Arc::new(OfflineBackend),
//! ));
//! let _sweeper = engine.spawn_sweeper();
//!
//! let context = UserContext::new("Alex").with_streak_days(10).with_hour_of_day(9);
//! println!("{}", engine.personalized_content(&context).await);
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod backend;
pub mod config;
pub mod content;
pub mod engine;
pub mod error;
pub mod prompt;

// Re-exports for convenience
pub use backend::{GenerationBackend, OfflineBackend};
pub use config::EngineConfig;
pub use content::{ContentKind, ContentSource, PersonalizedContent, DEFAULT_MESSAGE};
pub use engine::{EngineStats, PersonalizationEngine};
pub use error::{ConfigError, ConfigResult, GenerationError, PersonalizationError};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the engine
    pub use crate::{
        ContentKind, EngineConfig, GenerationBackend, GenerationError, PersonalizationEngine,
        PersonalizedContent,
    };
    pub use spur_catalog::UserContext;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
