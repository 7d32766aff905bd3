//! Deterministic offline embedder.
//!
//! Hashes tokens into a fixed-dimension bag-of-words vector. Nothing
//! semantic about it, but it is fast, needs no network, and identical
//! text always produces identical vectors, which is exactly what the
//! retrieval tests need.

use ndarray::Array1;
use sha2::{Digest, Sha256};

use crate::embedder::{EmbedderBackend, Embedding};

pub const DEFAULT_HASHING_DIM: usize = 256;

pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn bucket(&self, token: &str) -> usize {
        let digest = Sha256::digest(token.as_bytes());
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&digest[..8]);
        (u64::from_be_bytes(raw) % self.dim as u64) as usize
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASHING_DIM)
    }
}

impl EmbedderBackend for HashingEmbedder {
    fn embed(&self, text: &str) -> Embedding {
        let mut vector = Array1::<f32>::zeros(self.dim);
        for token in text
            .to_lowercase()
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
        {
            vector[self.bucket(token)] += 1.0;
        }

        // L2-normalize so distances are comparable across text lengths.
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.mapv_inplace(|v| v / norm);
        }

        Embedding::ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("fever and chills");
        let b = embedder.embed("fever and chills");
        assert_eq!(a.vector, b.vector);
        assert!(!a.is_degraded());
    }

    #[test]
    fn test_distinct_texts_differ() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed("fever and chills");
        let b = embedder.embed("sprained ankle");
        assert_ne!(a.vector, b.vector);
    }

    #[test]
    fn test_dimension_respected() {
        let embedder = HashingEmbedder::new(64);
        assert_eq!(embedder.embed("headache").vector.len(), 64);
        assert_eq!(embedder.dimension(), 64);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::default();
        let embedding = embedder.embed("");
        assert!(embedding.vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_normalized() {
        let embedder = HashingEmbedder::default();
        let vector = embedder.embed("nausea vomiting cramps").vector;
        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
