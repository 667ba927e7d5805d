//! Spur Response Cache
//!
//! Concurrent key/value store where each entry carries its own time-to-live.
//! Used by the personalization engine to avoid re-generating content inside
//! a TTL window.
//!
//! # Example
//!
//! ```rust
//! use spur_cache::ResponseCache;
//! use std::time::Duration;
//!
//! let cache = ResponseCache::new();
//! cache.put("quote-2024-06-01", "Stay the course.".to_string(), Duration::from_secs(86_400));
//! assert_eq!(cache.get("quote-2024-06-01").as_deref(), Some("Stay the course."));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;

pub use cache::{CacheStats, ResponseCache};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
