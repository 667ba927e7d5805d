//! Spur Template Catalog
//!
//! The deterministic half of the personalization engine: a static set of
//! motivational templates, the rules that decide which of them apply to a
//! user's current situation, and a reproducible way to pick one per day.
//!
//! # Pipeline
//!
//! ```text
//! UserContext → TemplateCatalog::match_context → [&Template] → select(date, user) → render → text
//! ```
//!
//! # Example
//!
//! ```rust
//! use spur_catalog::{select, TemplateCatalog, UserContext};
//! use chrono::NaiveDate;
//!
//! let context = UserContext::new("Alex").with_streak_days(10).with_hour_of_day(9);
//! let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//!
//! if let Some(candidates) = TemplateCatalog::builtin().match_context(&context) {
//!     let template = select(&candidates, date, &context.user_name);
//!     println!("{}", template.render(&context));
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod catalog;
pub mod context;
pub mod render;
pub mod selector;
pub mod template;

// Re-exports for convenience
pub use catalog::TemplateCatalog;
pub use context::UserContext;
pub use render::render;
pub use selector::{seed_for, select, stable_hash};
pub use template::{ApplicabilityRule, Category, Template};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
