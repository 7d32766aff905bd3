//! Basic text normalization shared by the mapper and lemmatizer.

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize free text for matching:
/// - lowercase
/// - replace everything outside `[a-z0-9\s]` with a space
/// - collapse whitespace runs to a single space, trim
pub fn normalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let stripped = NON_ALNUM.replace_all(&lower, " ");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
