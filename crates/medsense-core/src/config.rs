//! Configuration and data directory layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Paths to the static reference data MedSense loads at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Symptom vocabulary file (`data/symptoms_db.json`).
    pub vocabulary_file: PathBuf,
    /// Reference document corpus (`data/medical_docs/`).
    pub docs_dir: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            vocabulary_file: root.join("symptoms_db.json"),
            docs_dir: root.join("medical_docs"),
            root,
        }
    }

    /// Check that the reference data exists. Both inputs are required
    /// at startup; a missing one is a fatal configuration error.
    pub fn validate(&self) -> Result<()> {
        if !self.vocabulary_file.is_file() {
            return Err(Error::Config(format!(
                "vocabulary file not found: {}",
                self.vocabulary_file.display()
            )));
        }
        if !self.docs_dir.is_dir() {
            return Err(Error::Config(format!(
                "document directory not found: {}",
                self.docs_dir.display()
            )));
        }
        Ok(())
    }
}

/// Top-level MedSense configuration.
#[derive(Debug, Clone)]
pub struct MedSenseConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// Embedding dimension (768 for text-embedding-004).
    pub embedding_dim: usize,
    /// Gemini API key, if configured. Without one the server falls back
    /// to the deterministic offline embedder and a stubbed LLM reply.
    pub gemini_api_key: Option<String>,
}

impl MedSenseConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let gemini_api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GENAI_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty());

        Self {
            port,
            data_paths: DataPaths::new(data_dir),
            embedding_dim: 768,
            gemini_api_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_paths_layout() {
        let paths = DataPaths::new("data");
        assert_eq!(paths.vocabulary_file, PathBuf::from("data/symptoms_db.json"));
        assert_eq!(paths.docs_dir, PathBuf::from("data/medical_docs"));
    }

    #[test]
    fn test_validate_missing_root() {
        let paths = DataPaths::new("/nonexistent/medsense-data");
        assert!(matches!(paths.validate(), Err(Error::Config(_))));
    }
}
