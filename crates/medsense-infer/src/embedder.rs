//! Embedding provider trait.
//!
//! `EmbedderBackend` abstracts over embedding generation. A provider
//! failure never reaches the caller as an error: the backend returns a
//! zero vector of its known dimension, tagged `Degraded` so tests and
//! diagnostics can still tell it apart from a genuine embedding.

use ndarray::Array1;

/// Whether the embedding came back from the provider or is a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedStatus {
    Ok,
    /// Zero-vector fallback; carries the failure cause for diagnostics.
    Degraded(String),
}

/// Result of an embedding operation.
#[derive(Debug, Clone)]
pub struct Embedding {
    /// Float32 vector, always `dimension()` long.
    pub vector: Array1<f32>,
    pub status: EmbedStatus,
}

impl Embedding {
    pub fn ok(vector: Array1<f32>) -> Self {
        Self { vector, status: EmbedStatus::Ok }
    }

    /// Zero-vector fallback for a failed provider call.
    pub fn degraded(dim: usize, cause: impl Into<String>) -> Self {
        Self {
            vector: Array1::zeros(dim),
            status: EmbedStatus::Degraded(cause.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, EmbedStatus::Degraded(_))
    }
}

/// Trait for embedding backends.
pub trait EmbedderBackend: Send + Sync {
    /// Embed a text string. Infallible by contract; failures degrade to
    /// a tagged zero vector.
    fn embed(&self, text: &str) -> Embedding;

    /// Embed a batch of texts, preserving order.
    fn embed_batch(&self, texts: &[&str]) -> Vec<Embedding> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// The fixed output dimension.
    fn dimension(&self) -> usize;
}
