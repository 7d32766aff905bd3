//! MedSense NLP — normalization, lemmatization, symptom vocabulary and mapper.

pub mod lemma;
pub mod mapper;
pub mod normalize;
pub mod vocabulary;

pub use lemma::{Lemmatizer, SuffixLemmatizer};
pub use mapper::{SymptomMapper, SymptomMatch};
pub use normalize::normalize;
pub use vocabulary::{SymptomVocabulary, VocabularyEntry};
