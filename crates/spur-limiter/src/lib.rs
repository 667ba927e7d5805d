//! Spur Rate Limiter
//!
//! Sliding-window admission control protecting the generative-AI call budget.
//! Two trailing windows are tracked over a single timestamp log:
//!
//! - **per minute**: exceeding it suspends the caller until a slot frees up
//! - **per hour**: exceeding it denies the request outright
//!
//! # Example
//!
//! ```rust,ignore
//! use spur_limiter::{RateLimiter, RateLimiterConfig};
//!
//! let limiter = RateLimiter::new(RateLimiterConfig::new(10, 100));
//! if limiter.acquire_permit().await {
//!     // call the backend
//! }
//! println!("{:?}", limiter.usage_stats());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod limiter;
pub mod window;

pub use error::RateLimitError;
pub use limiter::RateLimiter;
pub use window::{Admission, RateLimiterConfig, RateWindow, UsageStats, HOUR, MINUTE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
