//! Corpus loading.
//!
//! A corpus is an ordered, immutable set of documents. Insertion order is
//! the id space: each document gets its ordinal position as `id` at load
//! time and keeps it until the next full reload.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{DocId, Document};

/// Persisted form of one document. Fetch-side metadata such as `url` or
/// `length` may be present and is ignored beyond title/content.
#[derive(Debug, Clone, Deserialize)]
pub struct DocRecord {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// The full in-memory set of reference documents available for retrieval.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    /// Assign ordinal ids in input order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = DocRecord>,
    {
        let docs = records
            .into_iter()
            .enumerate()
            .map(|(id, r)| Document { id, title: r.title, content: r.content })
            .collect();
        Self { docs }
    }

    /// Load a JSON array of document records, e.g. the `all_docs.json`
    /// written by the documentation fetcher. A missing or unparsable file
    /// is `CorpusUnavailable`; callers treat that as "zero documents".
    pub fn load_json(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::CorpusUnavailable(format!("{}: {e}", path.display())))?;
        let records: Vec<DocRecord> = serde_json::from_slice(&bytes)
            .map_err(|e| Error::CorpusUnavailable(format!("{}: {e}", path.display())))?;
        Ok(Self::from_records(records))
    }

    /// Load every `.txt` file under `dir` as one document each, title taken
    /// from the file stem. Paths are sorted so ordinals are deterministic.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::CorpusUnavailable(format!("{}: not a directory", dir.display())));
        }
        let mut paths: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
            .map(|e| e.path().to_path_buf())
            .collect();
        paths.sort();
        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(_) => String::from_utf8_lossy(&std::fs::read(&path).map_err(|e| {
                    Error::CorpusUnavailable(format!("{}: {e}", path.display()))
                })?)
                .to_string(),
            };
            let title = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            records.push(DocRecord { title, content, url: None });
        }
        Ok(Self::from_records(records))
    }

    pub fn docs(&self) -> &[Document] {
        &self.docs
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.get(id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
