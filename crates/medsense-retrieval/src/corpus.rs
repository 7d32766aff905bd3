//! Reference document loading.

use std::path::Path;

use tracing::info;

use medsense_core::{Error, Result};

/// One reference document. The whole file is a single retrievable unit;
/// there is no chunking.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source filename, unique within the corpus.
    pub id: String,
    pub text: String,
}

/// Load every `.txt` file in `dir`, sorted by filename so the corpus
/// order (and therefore index positions) is deterministic.
pub fn load_documents(dir: &Path) -> Result<Vec<Document>> {
    if !dir.is_dir() {
        return Err(Error::Config(format!(
            "document directory not found: {}",
            dir.display()
        )));
    }

    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".txt"))
        .collect();
    names.sort();

    let mut documents = Vec::with_capacity(names.len());
    for name in names {
        let text = std::fs::read_to_string(dir.join(&name))?;
        documents.push(Document { id: name, text });
    }

    info!("Loaded {} reference documents from {}", documents.len(), dir.display());
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_dir_is_config_error() {
        let err = load_documents(Path::new("/nonexistent/docs")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_loads_txt_sorted_ignores_others() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b_flu.txt"), "flu facts").unwrap();
        std::fs::write(dir.path().join("a_fever.txt"), "fever facts").unwrap();
        std::fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let docs = load_documents(dir.path()).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "a_fever.txt");
        assert_eq!(docs[0].text, "fever facts");
        assert_eq!(docs[1].id, "b_flu.txt");
    }

    #[test]
    fn test_empty_dir_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_documents(dir.path()).unwrap().is_empty());
    }
}
