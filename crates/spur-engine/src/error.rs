//! Error types for the personalization engine
//!
//! Everything here except [`ConfigError`] is absorbed inside the engine:
//! - [`GenerationError`]: the backend call failed, timed out, or returned nothing
//! - [`PersonalizationError`]: why the engine left the generative path
//!
//! Neither ever reaches a caller of `personalized_content`.

use std::path::PathBuf;
use std::time::Duration;

/// Single failure outcome of a generation backend call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Backend did not answer within the configured timeout
    #[error("generation timed out after {}s", .after.as_secs())]
    Timeout {
        /// Timeout that elapsed
        after: Duration,
    },

    /// Network, quota, moderation, or any other backend-side failure
    #[error("backend error: {0}")]
    Backend(String),

    /// Backend answered with blank text
    #[error("backend returned an empty response")]
    EmptyResponse,
}

impl GenerationError {
    /// Create backend error
    #[inline]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Reasons a request is served from templates instead of the backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonalizationError {
    /// Hourly generation quota exhausted
    #[error("generation quota exceeded")]
    QuotaExceeded,

    /// Backend call failed
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// No template applies to the context
    #[error("no template matched the user context")]
    NoTemplateMatch,
}

impl PersonalizationError {
    /// Check if the backend was actually called
    #[inline]
    #[must_use]
    pub fn reached_backend(&self) -> bool {
        matches!(self, Self::Generation(_))
    }
}

/// Errors loading or validating engine configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Malformed TOML or wrong field types
    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// IO error reading a config file
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that failed to load
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Semantically invalid value
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
