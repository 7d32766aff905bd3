//! Symptom mapper — free text to normalized vocabulary matches.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::lemma::Lemmatizer;
use crate::normalize::normalize;
use crate::vocabulary::SymptomVocabulary;

/// One matched symptom, populated from the vocabulary entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SymptomMatch {
    pub symptom: String,
    pub severity: i64,
    pub related_conditions: Vec<String>,
}

/// Maps user text to vocabulary symptoms via a substring pass and a
/// token-level fuzzy pass. Results are set-semantic: no duplicates, and
/// callers must not depend on ordering.
pub struct SymptomMapper {
    vocabulary: SymptomVocabulary,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl SymptomMapper {
    pub fn new(vocabulary: SymptomVocabulary, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self { vocabulary, lemmatizer }
    }

    pub fn vocabulary(&self) -> &SymptomVocabulary {
        &self.vocabulary
    }

    /// Map free text to symptom matches. Blank input and no-match input
    /// both yield an empty vec.
    pub fn map(&self, text: &str) -> Vec<SymptomMatch> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let tokens = self.lemmatizer.lemmatize_and_filter(text);
        let mut matched: BTreeSet<&str> = BTreeSet::new();

        // Pass 1: vocabulary key appears verbatim in the normalized text.
        for (key, _) in self.vocabulary.iter() {
            if normalized.contains(key) {
                matched.insert(key);
            }
        }

        // Pass 2: lemmatized token vs key, either direction.
        for token in &tokens {
            for (key, _) in self.vocabulary.iter() {
                if token.as_str() == key || key.contains(token.as_str()) || token.contains(key) {
                    matched.insert(key);
                }
            }
        }

        debug!(input_len = text.len(), matches = matched.len(), "mapped symptoms");

        matched
            .into_iter()
            .map(|key| {
                let entry = self.vocabulary.get(key);
                SymptomMatch {
                    symptom: key.to_string(),
                    severity: entry.map(|e| e.severity_score).unwrap_or(1),
                    related_conditions: entry
                        .map(|e| e.related_conditions.clone())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }
}
