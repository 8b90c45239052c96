//! docbase-keyword
//!
//! Degraded-mode ranker based on lexical overlap. Used whenever the tf-idf
//! index is unavailable (empty corpus, empty vocabulary, or forced by
//! configuration) under the same ordering and threshold contract as the
//! vector ranker, so the substitution is invisible to callers.

use std::collections::HashSet;

use docbase_core::config::RetrievalConfig;
use docbase_core::corpus::Corpus;
use docbase_core::traits::DocumentRanker;
use docbase_core::types::{DocId, RankerKind, SearchHit};

/// Lowercase whitespace-split word set, matching how queries are split.
fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase().split_whitespace().map(str::to_string).collect()
}

struct DocWords {
    doc_id: DocId,
    title: HashSet<String>,
    content: HashSet<String>,
}

pub struct KeywordRanker {
    docs: Vec<DocWords>,
    threshold: f32,
}

impl KeywordRanker {
    pub fn new(corpus: &Corpus, config: &RetrievalConfig) -> Self {
        let docs = corpus
            .docs()
            .iter()
            .map(|d| DocWords {
                doc_id: d.id,
                title: word_set(&d.title),
                content: word_set(&d.content),
            })
            .collect();
        Self { docs, threshold: config.score_threshold }
    }

    /// Overlap fraction of query words found in content, plus twice the
    /// fraction found in the title. A title match is a stronger relevance
    /// signal than a body match.
    fn score(&self, query_words: &HashSet<String>, doc: &DocWords) -> f32 {
        let query_len = query_words.len().max(1) as f32;
        let content_overlap = query_words.intersection(&doc.content).count() as f32;
        let title_overlap = query_words.intersection(&doc.title).count() as f32;
        content_overlap / query_len + title_overlap / query_len * 2.0
    }
}

impl DocumentRanker for KeywordRanker {
    fn kind(&self) -> RankerKind {
        RankerKind::Keyword
    }

    fn rank(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
        let query_words = word_set(query);
        let mut hits: Vec<SearchHit> = self
            .docs
            .iter()
            .map(|doc| SearchHit {
                doc_id: doc.doc_id,
                score: self.score(&query_words, doc),
                source: RankerKind::Keyword,
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
