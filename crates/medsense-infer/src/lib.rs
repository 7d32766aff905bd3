//! MedSense Infer — embedding providers.
//!
//! `EmbedderBackend` is the seam between retrieval and the embedding
//! service. `GeminiEmbedder` calls the remote API and degrades to a
//! tagged zero vector on failure; `HashingEmbedder` is a deterministic
//! offline fallback used when no API key is configured, and by tests.

pub mod embedder;
pub mod gemini;
pub mod hashing;

pub use embedder::{EmbedStatus, EmbedderBackend, Embedding};
pub use gemini::{GeminiEmbedder, GEMINI_EMBED_DIM};
pub use hashing::HashingEmbedder;

use std::sync::Arc;

/// Create the embedder for the given configuration: Gemini when an API
/// key is present, otherwise the offline hashing embedder.
pub fn create_embedder(api_key: Option<&str>) -> Arc<dyn EmbedderBackend> {
    match api_key {
        Some(key) => {
            tracing::info!("Using Gemini embedder (dim={})", GEMINI_EMBED_DIM);
            Arc::new(GeminiEmbedder::new(key))
        }
        None => {
            tracing::info!("No API key configured. Using offline hashing embedder.");
            Arc::new(HashingEmbedder::default())
        }
    }
}
