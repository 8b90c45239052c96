//! docbase-engine
//!
//! The retrieval engine facade: owns the corpus and one ranking strategy,
//! chosen once at construction. Downstream stages (requirement analysis,
//! specification generation) call `search` for ranked documents or
//! `relevant_context` for a length-bounded prompt context.

use std::path::Path;

use docbase_core::config::{RankerMode, RetrievalConfig};
use docbase_core::corpus::Corpus;
use docbase_core::traits::DocumentRanker;
use docbase_core::types::{RankedResult, RankerKind};
use docbase_core::{Error, Result};
use docbase_keyword::KeywordRanker;
use docbase_vector::TfidfRanker;

pub struct Engine {
    config: RetrievalConfig,
    corpus: Corpus,
    ranker: Box<dyn DocumentRanker>,
}

impl Engine {
    /// Open the engine against the configured corpus path. A missing or
    /// unparsable corpus is not fatal: the engine starts with zero
    /// documents and answers every query with empty results.
    pub fn open(config: RetrievalConfig) -> Self {
        let corpus = match Corpus::load_json(&config.corpus_path) {
            Ok(corpus) => corpus,
            Err(e) => {
                tracing::warn!("no corpus loaded, starting empty: {e}");
                Corpus::default()
            }
        };
        Self::with_corpus(config, corpus)
    }

    /// Build an engine over an already-loaded corpus. Ranker selection
    /// happens here, once: tf-idf when the index builds, keyword overlap
    /// otherwise (or when forced by `ranker = "keyword"`).
    pub fn with_corpus(config: RetrievalConfig, corpus: Corpus) -> Self {
        let ranker = select_ranker(&config, &corpus);
        Self { config, corpus, ranker }
    }

    /// Ranked documents for a free-text query, at most `top_k`, each with
    /// score strictly above the configured threshold. `verbose` only gates
    /// diagnostics and never changes results.
    pub fn search(&self, query: &str, top_k: usize, verbose: bool) -> Vec<RankedResult> {
        if self.corpus.is_empty() {
            if verbose {
                tracing::debug!("no documentation loaded");
            }
            return Vec::new();
        }
        let hits = self.ranker.rank(query, top_k);
        if verbose {
            tracing::debug!(
                hits = hits.len(),
                ranker = ?self.ranker.kind(),
                "ranked query"
            );
        }
        hits.into_iter()
            .filter_map(|h| {
                self.corpus.get(h.doc_id).map(|d| RankedResult {
                    document: d.clone(),
                    score: h.score,
                })
            })
            .collect()
    }

    /// Assemble a context blob from the top-ranked documents: per document
    /// a `## title` heading plus the leading excerpt of its content. Blocks
    /// stop being appended once the accumulated text reaches `max_length`,
    /// then the whole string is cut to exactly `max_length` characters, so
    /// only the last included block can be truncated mid-word.
    pub fn relevant_context(&self, query: &str, max_length: usize, verbose: bool) -> String {
        let results = self.search(query, self.config.context_top_k, verbose);

        let mut context = String::new();
        for result in &results {
            if context.chars().count() >= max_length {
                break;
            }
            let doc = &result.document;
            context.push_str("\n\n## ");
            context.push_str(&doc.title);
            context.push('\n');
            context.extend(doc.content.chars().take(self.config.excerpt_chars));
            context.push_str("...\n");
        }
        if context.chars().count() > max_length {
            context = context.chars().take(max_length).collect();
        }
        context
    }

    /// Replace the whole corpus and index from `path`. The new index is
    /// built fully before anything is swapped; on error the engine keeps
    /// its previous state.
    pub fn reload(&mut self, path: &Path) -> Result<()> {
        let corpus = Corpus::load_json(path)?;
        let ranker = select_ranker(&self.config, &corpus);
        self.corpus = corpus;
        self.ranker = ranker;
        Ok(())
    }

    pub fn doc_count(&self) -> usize {
        self.corpus.len()
    }

    pub fn ranker_kind(&self) -> RankerKind {
        self.ranker.kind()
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }
}

fn select_ranker(config: &RetrievalConfig, corpus: &Corpus) -> Box<dyn DocumentRanker> {
    if config.ranker == RankerMode::Auto {
        if let Some(ranker) = TfidfRanker::build(corpus, config) {
            tracing::debug!(vocab = ranker.index().vocab_len(), "using tf-idf ranking");
            return Box::new(ranker);
        }
        let reason = Error::IndexingUnavailable(
            if corpus.is_empty() { "empty corpus" } else { "empty vocabulary" }.to_string(),
        );
        tracing::warn!("{reason}; using keyword search");
    }
    Box::new(KeywordRanker::new(corpus, config))
}
