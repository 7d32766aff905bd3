//! MedSense Retrieval — corpus loading, vector index, retrieval engine.

pub mod corpus;
pub mod engine;
pub mod index;

pub use corpus::{load_documents, Document};
pub use engine::RetrievalEngine;
pub use index::VectorIndex;
