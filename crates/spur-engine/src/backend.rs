//! Generation backend seam
//!
//! The engine treats the generative model as a black box. Implementations
//! fold every failure mode into [`GenerationError`]; the engine applies its
//! own timeout around each call.

use crate::error::GenerationError;
use async_trait::async_trait;

/// Asynchronous text generator
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text for a prompt
    ///
    /// # Errors
    /// Any backend-side failure, reported as [`GenerationError`]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Backend for deployments without a generative model
///
/// Always fails, so every request resolves through the template path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

#[async_trait]
impl GenerationBackend for OfflineBackend {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::backend("generation backend not configured"))
    }
}
