//! Symptom vocabulary — static reference data loaded once at startup.
//!
//! File format:
//! ```json
//! { "symptoms": { "fever": { "severity_score": 5, "related_conditions": ["flu"] } } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use medsense_core::{Error, Result};

use crate::normalize::normalize;

fn default_severity() -> i64 {
    1
}

/// A single vocabulary entry as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct VocabularyEntry {
    #[serde(default = "default_severity")]
    pub severity_score: i64,
    #[serde(default)]
    pub related_conditions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct VocabularyFile {
    symptoms: BTreeMap<String, VocabularyEntry>,
}

/// The loaded, validated symptom vocabulary. Keys are lowercase-normalized
/// and unique; the map is ordered so iteration is reproducible.
#[derive(Debug, Clone)]
pub struct SymptomVocabulary {
    entries: BTreeMap<String, VocabularyEntry>,
}

impl SymptomVocabulary {
    /// Load and validate the vocabulary file. Missing or malformed files
    /// and key collisions after normalization are fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Vocabulary(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file: VocabularyFile = serde_json::from_str(&raw).map_err(|e| {
            Error::Vocabulary(format!("malformed vocabulary {}: {}", path.display(), e))
        })?;

        let vocabulary = Self::from_entries(file.symptoms)?;
        info!("Loaded {} symptoms from {}", vocabulary.len(), path.display());
        Ok(vocabulary)
    }

    /// Build a vocabulary from already-parsed entries, normalizing keys.
    pub fn from_entries(raw: BTreeMap<String, VocabularyEntry>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (name, entry) in raw {
            let key = normalize(&name);
            if key.is_empty() {
                return Err(Error::Vocabulary(format!(
                    "symptom name {:?} is empty after normalization",
                    name
                )));
            }
            if entries.insert(key.clone(), entry).is_some() {
                return Err(Error::Vocabulary(format!(
                    "duplicate symptom key after normalization: {:?}",
                    key
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Iterate entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VocabularyEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, symptom: &str) -> Option<&VocabularyEntry> {
        self.entries.get(symptom)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_vocab(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_normalize_keys() {
        let file = write_vocab(
            r#"{"symptoms": {"Chest Pain": {"severity_score": 8, "related_conditions": ["angina"]}}}"#,
        );
        let vocab = SymptomVocabulary::load(file.path()).unwrap();
        let entry = vocab.get("chest pain").unwrap();
        assert_eq!(entry.severity_score, 8);
        assert_eq!(entry.related_conditions, vec!["angina"]);
    }

    #[test]
    fn test_defaults_applied() {
        let file = write_vocab(r#"{"symptoms": {"fatigue": {}}}"#);
        let vocab = SymptomVocabulary::load(file.path()).unwrap();
        let entry = vocab.get("fatigue").unwrap();
        assert_eq!(entry.severity_score, 1);
        assert!(entry.related_conditions.is_empty());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = SymptomVocabulary::load(Path::new("/nonexistent/symptoms.json")).unwrap_err();
        assert!(matches!(err, Error::Vocabulary(_)));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let file = write_vocab(r#"{"symptoms": ["not", "a", "map"]}"#);
        assert!(SymptomVocabulary::load(file.path()).is_err());
    }

    #[test]
    fn test_normalization_collision_rejected() {
        let mut raw = BTreeMap::new();
        raw.insert(
            "Fever".to_string(),
            VocabularyEntry { severity_score: 5, related_conditions: vec![] },
        );
        raw.insert(
            "fever!".to_string(),
            VocabularyEntry { severity_score: 3, related_conditions: vec![] },
        );
        assert!(SymptomVocabulary::from_entries(raw).is_err());
    }
}
