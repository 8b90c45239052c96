//! Tf-idf term-weight index.
//!
//! One weighted sparse vector per document over a fixed vocabulary of the
//! `max_features` highest-frequency terms in the corpus. The vocabulary and
//! weights are derived exclusively from the corpus at build time; queries
//! are projected into the fixed vocabulary and never extend it.

use std::collections::{HashMap, HashSet};

use docbase_core::corpus::Corpus;

use crate::vocab::tokenize;

/// Sparse weighted vector, sorted by term id, L2-normalised when non-empty.
pub(crate) type SparseVec = Vec<(usize, f32)>;

pub struct TfidfIndex {
    vocab: HashMap<String, usize>,
    idf: Vec<f32>,
    rows: Vec<SparseVec>,
}

impl TfidfIndex {
    /// Build the index for a corpus, or `None` when there is nothing to
    /// index (empty corpus, or a corpus whose tokens are all stop-words).
    /// `None` is the "indexing unavailable" signal, not an error: callers
    /// fall back to keyword ranking.
    pub fn build(corpus: &Corpus, max_features: usize) -> Option<Self> {
        if corpus.is_empty() || max_features == 0 {
            return None;
        }

        let doc_terms: Vec<Vec<String>> =
            corpus.docs().iter().map(|d| tokenize(&d.content)).collect();

        // Corpus-wide term count and document frequency.
        let mut term_count: HashMap<String, u64> = HashMap::new();
        let mut doc_freq: HashMap<String, u32> = HashMap::new();
        for terms in &doc_terms {
            let mut seen: HashSet<&str> = HashSet::new();
            for term in terms {
                *term_count.entry(term.clone()).or_default() += 1;
                if seen.insert(term) {
                    *doc_freq.entry(term.clone()).or_default() += 1;
                }
            }
        }
        if term_count.is_empty() {
            return None;
        }

        // Keep the top max_features terms by corpus-wide count, ties broken
        // lexicographically so the selection is deterministic.
        let mut ranked: Vec<(&String, u64)> = term_count.iter().map(|(t, &c)| (t, c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(max_features);

        let n_docs = corpus.len() as f32;
        let mut vocab = HashMap::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (term_id, (term, _)) in ranked.into_iter().enumerate() {
            let df = doc_freq[term] as f32;
            vocab.insert(term.clone(), term_id);
            // Smoothed idf, as if one extra document contained every term.
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
        }

        let rows = doc_terms
            .iter()
            .map(|terms| weigh(terms, &vocab, &idf))
            .collect();

        tracing::debug!(docs = corpus.len(), vocab = vocab.len(), "built tf-idf index");
        Some(Self { vocab, idf, rows })
    }

    /// Project free text into the fixed vocabulary with the same weighting
    /// used at build time. Out-of-vocabulary terms contribute zero weight;
    /// a query sharing no terms with the vocabulary projects to the empty
    /// vector.
    pub(crate) fn project(&self, text: &str) -> SparseVec {
        weigh(&tokenize(text), &self.vocab, &self.idf)
    }

    pub(crate) fn rows(&self) -> &[SparseVec] {
        &self.rows
    }

    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }

    pub fn doc_count(&self) -> usize {
        self.rows.len()
    }
}

/// Term-frequency times idf over the fixed vocabulary, L2-normalised.
fn weigh(terms: &[String], vocab: &HashMap<String, usize>, idf: &[f32]) -> SparseVec {
    let mut tf: HashMap<usize, f32> = HashMap::new();
    for term in terms {
        if let Some(&term_id) = vocab.get(term) {
            *tf.entry(term_id).or_default() += 1.0;
        }
    }
    let mut vec: SparseVec = tf.into_iter().map(|(id, tf)| (id, tf * idf[id])).collect();
    vec.sort_by_key(|&(id, _)| id);
    let norm = vec.iter().map(|&(_, w)| w * w).sum::<f32>().sqrt();
    if norm > 0.0 {
        for entry in &mut vec {
            entry.1 /= norm;
        }
    }
    vec
}

/// Dot product of two sorted sparse vectors. Both sides are normalised, so
/// this is the cosine similarity.
pub(crate) fn dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let (mut i, mut j, mut sum) = (0, 0, 0.0);
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}
