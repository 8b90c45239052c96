use docbase_core::config::RetrievalConfig;
use docbase_core::corpus::Corpus;
use docbase_core::traits::DocumentRanker;
use docbase_core::types::{RankerKind, SearchHit};

use crate::index::{dot, TfidfIndex};

/// Cosine-similarity ranker over a tf-idf index.
pub struct TfidfRanker {
    index: TfidfIndex,
    threshold: f32,
}

impl TfidfRanker {
    /// `None` when the index cannot be built (empty corpus or empty
    /// vocabulary); the engine then degrades to keyword ranking.
    pub fn build(corpus: &Corpus, config: &RetrievalConfig) -> Option<Self> {
        let index = TfidfIndex::build(corpus, config.max_features)?;
        Some(Self { index, threshold: config.score_threshold })
    }

    pub fn index(&self) -> &TfidfIndex {
        &self.index
    }
}

impl DocumentRanker for TfidfRanker {
    fn kind(&self) -> RankerKind {
        RankerKind::Vector
    }

    fn rank(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let query_vec = self.index.project(query);
        if query_vec.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<SearchHit> = self
            .index
            .rows()
            .iter()
            .enumerate()
            .map(|(doc_id, row)| SearchHit {
                doc_id,
                score: dot(&query_vec, row),
                source: RankerKind::Vector,
            })
            .filter(|h| h.score > self.threshold)
            .collect();
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.doc_id.cmp(&b.doc_id))
        });
        hits.truncate(top_k);
        hits
    }
}
