//! Domain types shared by the vector and keyword rankers.

use serde::{Deserialize, Serialize};

/// Ordinal position of a document in the loaded corpus. Assigned once at
/// load time and used as the tie-breaker for equal relevance scores.
pub type DocId = usize;

/// A reference document held in memory for the life of the engine.
/// Never mutated after load; a corpus reload replaces the whole set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub content: String,
}

/// Indicates which ranking strategy produced a hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RankerKind {
    Vector,
    Keyword,
}

/// The minimal surface returned by all rankers.
///
/// `doc_id` is the corpus ordinal. `score` is strategy-specific but higher
/// is always better, and anything returned is strictly above the configured
/// threshold. `source` labels the origin strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
    pub source: RankerKind,
}

/// A hit joined back to its document, as handed to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub document: Document,
    pub score: f32,
}
