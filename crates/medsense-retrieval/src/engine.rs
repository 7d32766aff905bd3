//! Retrieval engine — builds the index at startup, answers top-k queries.

use std::path::Path;
use std::sync::Arc;

use ndarray::Array2;
use tracing::{debug, info};

use medsense_core::Result;
use medsense_infer::EmbedderBackend;

use crate::corpus::{load_documents, Document};
use crate::index::VectorIndex;

/// Semantic retrieval over a fixed corpus of reference documents.
///
/// Built once at startup and read-only afterwards. The engine owns the
/// documents; the index holds only embeddings, and search results are
/// row indices back into the document list.
pub struct RetrievalEngine {
    documents: Vec<Document>,
    index: Option<VectorIndex>,
    embedder: Arc<dyn EmbedderBackend>,
}

impl std::fmt::Debug for RetrievalEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalEngine")
            .field("documents", &self.documents.len())
            .field("indexed", &self.index.is_some())
            .finish()
    }
}

impl RetrievalEngine {
    /// Load the corpus from `docs_dir`, embed every document, and build
    /// the index. A missing directory is fatal; an empty one leaves the
    /// index empty and every query returns no results.
    pub fn open(docs_dir: &Path, embedder: Arc<dyn EmbedderBackend>) -> Result<Self> {
        let documents = load_documents(docs_dir)?;

        if documents.is_empty() {
            info!("Document corpus is empty; retrieval disabled");
            return Ok(Self { documents, index: None, embedder });
        }

        let dim = embedder.dimension();
        let mut matrix = Array2::<f32>::zeros((documents.len(), dim));
        let mut degraded = 0usize;
        for (row, doc) in documents.iter().enumerate() {
            let embedding = embedder.embed(&doc.text);
            if embedding.is_degraded() {
                degraded += 1;
            }
            matrix.row_mut(row).assign(&embedding.vector);
        }
        if degraded > 0 {
            tracing::warn!("{} of {} document embeddings degraded", degraded, documents.len());
        }

        info!("Built vector index over {} documents (dim={})", documents.len(), dim);
        Ok(Self {
            documents,
            index: Some(VectorIndex::new(matrix)),
            embedder,
        })
    }

    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Return the texts of the `top_k` documents closest to `text`, in
    /// ascending distance order. Fewer than `top_k` when the corpus is
    /// smaller; empty when the index is.
    pub fn query(&self, text: &str, top_k: usize) -> Vec<String> {
        let Some(index) = &self.index else {
            return Vec::new();
        };

        let embedding = self.embedder.embed(text);
        let hits = index.search(embedding.vector.view(), top_k);
        debug!(top_k, hits = hits.len(), "retrieval query");

        hits.into_iter()
            .map(|(row, _)| self.documents[row].text.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsense_core::Error;
    use medsense_infer::HashingEmbedder;

    fn embedder() -> Arc<dyn EmbedderBackend> {
        Arc::new(HashingEmbedder::new(64))
    }

    fn corpus(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, text) in files {
            std::fs::write(dir.path().join(name), text).unwrap();
        }
        dir
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let err =
            RetrievalEngine::open(Path::new("/nonexistent/docs"), embedder()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_corpus_returns_empty() {
        let dir = corpus(&[]);
        let engine = RetrievalEngine::open(dir.path(), embedder()).unwrap();
        assert_eq!(engine.doc_count(), 0);
        assert!(engine.query("fever", 3).is_empty());
        assert!(engine.query("anything at all", 100).is_empty());
    }

    #[test]
    fn test_query_bounded_by_corpus_size() {
        let dir = corpus(&[
            ("a.txt", "fever and influenza guidance"),
            ("b.txt", "sprained ankle care"),
        ]);
        let engine = RetrievalEngine::open(dir.path(), embedder()).unwrap();
        assert_eq!(engine.query("fever", 1).len(), 1);
        assert_eq!(engine.query("fever", 5).len(), 2);
    }

    #[test]
    fn test_identical_text_retrieved_first() {
        let dir = corpus(&[
            ("a.txt", "fever and influenza guidance"),
            ("b.txt", "sprained ankle care"),
            ("c.txt", "migraine and headache notes"),
        ]);
        let engine = RetrievalEngine::open(dir.path(), embedder()).unwrap();
        let results = engine.query("sprained ankle care", 3);
        assert_eq!(results[0], "sprained ankle care");
    }

    #[test]
    fn test_query_is_deterministic() {
        let dir = corpus(&[
            ("a.txt", "fever and influenza guidance"),
            ("b.txt", "sprained ankle care"),
            ("c.txt", "migraine and headache notes"),
        ]);
        let engine = RetrievalEngine::open(dir.path(), embedder()).unwrap();
        let first = engine.query("headache", 3);
        let second = engine.query("headache", 3);
        assert_eq!(first, second);
    }
}
