//! Lemmatization and stop-word filtering.
//!
//! The linguistic preprocessing step is a pluggable collaborator: the
//! mapper only needs `lemmatize_and_filter`. The default implementation
//! is a suffix-stripping stemmer over the normalized text, which is
//! enough for token-level matching against a small symptom vocabulary.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::normalize::normalize;

/// Tokenize, drop stop words, reduce tokens to a base form.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize_and_filter(&self, text: &str) -> Vec<String>;
}

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
        "be", "because", "been", "being", "but", "by", "can", "could", "did", "do", "does",
        "feel", "feeling", "feels", "few", "for", "from", "get", "getting", "got", "had",
        "has", "have", "having", "he", "her", "his", "how", "i", "if", "in", "into", "is",
        "it", "its", "just", "like", "lot", "me", "more", "most", "my", "no", "not", "now",
        "of", "on", "or", "our", "out", "over", "quite", "really", "she", "since", "so",
        "some", "than", "that", "the", "their", "them", "then", "there", "these", "they",
        "this", "to", "too", "under", "up", "very", "was", "we", "were", "what", "when",
        "where", "which", "while", "who", "will", "with", "would", "you", "your",
    ]
    .into_iter()
    .collect()
});

/// Suffix rules, longest first. Replacement is appended to the stem.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("iness", "y"),
    ("ness", ""),
    ("ies", "y"),
    ("ied", "y"),
    ("ing", ""),
    ("ed", ""),
    ("es", "e"),
    ("s", ""),
];

/// Default lemmatizer: whitespace tokens from the normalized text,
/// stop words removed, common English suffixes stripped.
pub struct SuffixLemmatizer;

impl SuffixLemmatizer {
    pub fn new() -> Self {
        Self
    }

    /// Stem a single word. Words of length <= 3 pass through unchanged;
    /// so do words ending in "ss" (dizziness is handled by the "iness"
    /// rule before the plural rules can see it).
    fn stem(word: &str) -> String {
        if word.len() <= 3 {
            return word.to_string();
        }

        for &(suffix, replacement) in SUFFIX_RULES {
            if suffix == "s" && word.ends_with("ss") {
                continue;
            }
            if word.len() > suffix.len() + 2 && word.ends_with(suffix) {
                let mut stem = word[..word.len() - suffix.len()].to_string();
                // throbbing -> throbb -> throb
                if replacement.is_empty() {
                    let bytes = stem.as_bytes();
                    if bytes.len() >= 2
                        && bytes[bytes.len() - 1] == bytes[bytes.len() - 2]
                        && !matches!(bytes[bytes.len() - 1], b'l' | b's')
                    {
                        stem.pop();
                    }
                }
                stem.push_str(replacement);
                return stem;
            }
        }

        word.to_string()
    }
}

impl Default for SuffixLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer for SuffixLemmatizer {
    fn lemmatize_and_filter(&self, text: &str) -> Vec<String> {
        normalize(text)
            .split_whitespace()
            .filter(|t| !STOP_WORDS.contains(*t))
            .map(Self::stem)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stemming() {
        assert_eq!(SuffixLemmatizer::stem("vomiting"), "vomit");
        assert_eq!(SuffixLemmatizer::stem("cramps"), "cramp");
        assert_eq!(SuffixLemmatizer::stem("dizziness"), "dizzy");
        assert_eq!(SuffixLemmatizer::stem("headaches"), "headache");
        assert_eq!(SuffixLemmatizer::stem("throbbing"), "throb");
        assert_eq!(SuffixLemmatizer::stem("fever"), "fever");
        // Short words pass through
        assert_eq!(SuffixLemmatizer::stem("leg"), "leg");
    }

    #[test]
    fn test_stemming_is_stable() {
        assert_eq!(
            SuffixLemmatizer::stem("swelling"),
            SuffixLemmatizer::stem("swelling")
        );
    }

    #[test]
    fn test_filter_stop_words() {
        let lemmatizer = SuffixLemmatizer::new();
        let tokens = lemmatizer.lemmatize_and_filter("I have a fever and some chills");
        assert_eq!(tokens, vec!["fever", "chill"]);
    }

    #[test]
    fn test_blank_input() {
        let lemmatizer = SuffixLemmatizer::new();
        assert!(lemmatizer.lemmatize_and_filter("").is_empty());
        assert!(lemmatizer.lemmatize_and_filter("   ").is_empty());
    }

    #[test]
    fn test_handles_raw_punctuation() {
        let lemmatizer = SuffixLemmatizer::new();
        let tokens = lemmatizer.lemmatize_and_filter("Nausea, vomiting & cramps!");
        assert_eq!(tokens, vec!["nausea", "vomit", "cramp"]);
    }
}
