use crate::types::{RankerKind, SearchHit};

/// A ranking strategy over a fixed corpus.
///
/// Implementations are pure in-memory computations and must be
/// deterministic: the same query against the same corpus reproduces the
/// same hit sequence. Hits are sorted by descending score, ties broken by
/// ascending `doc_id`, capped at `top_k`, and every score is strictly
/// greater than the configured threshold.
pub trait DocumentRanker: Send + Sync {
    fn kind(&self) -> RankerKind;
    fn rank(&self, query: &str, top_k: usize) -> Vec<SearchHit>;
}
