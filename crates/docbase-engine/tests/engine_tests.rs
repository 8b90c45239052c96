use std::fs;
use tempfile::TempDir;

use docbase_core::config::{RankerMode, RetrievalConfig};
use docbase_core::corpus::{Corpus, DocRecord};
use docbase_core::types::RankerKind;
use docbase_engine::Engine;

fn record(title: &str, content: &str) -> DocRecord {
    DocRecord { title: title.to_string(), content: content.to_string(), url: None }
}

fn sample_corpus() -> Corpus {
    Corpus::from_records(vec![
        record("Badges", "Use a badge component to show status values."),
        record("Currency", "Format currency using a number component."),
    ])
}

fn engine(mode: RankerMode) -> Engine {
    let config = RetrievalConfig { ranker: mode, ..RetrievalConfig::default() };
    Engine::with_corpus(config, sample_corpus())
}

#[test]
fn status_badge_query_returns_badges_doc() {
    for mode in [RankerMode::Auto, RankerMode::Keyword] {
        let engine = engine(mode);
        let results = engine.search("status badge", 1, false);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document.title, "Badges");
        assert!(results[0].score > 0.1);
    }
}

#[test]
fn unrelated_query_returns_empty() {
    for mode in [RankerMode::Auto, RankerMode::Keyword] {
        let engine = engine(mode);
        assert!(engine.search("nonexistent unrelated term xyz", 3, false).is_empty());
    }
}

#[test]
fn results_are_bounded_thresholded_and_ordered() {
    for mode in [RankerMode::Auto, RankerMode::Keyword] {
        let engine = engine(mode);
        for top_k in [1usize, 2, 10] {
            let results = engine.search("badge component status", top_k, false);
            assert!(results.len() <= top_k);
            for r in &results {
                assert!(r.score > engine.config().score_threshold);
            }
            for pair in results.windows(2) {
                assert!(
                    pair[0].score > pair[1].score
                        || ((pair[0].score - pair[1].score).abs() < f32::EPSILON
                            && pair[0].document.id < pair[1].document.id)
                );
            }
        }
    }
}

#[test]
fn repeated_queries_reproduce_the_same_sequence() {
    let engine = engine(RankerMode::Auto);
    let first = engine.search("component", 5, false);
    let second = engine.search("component", 5, false);
    let ids = |rs: &[docbase_core::types::RankedResult]| {
        rs.iter().map(|r| r.document.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn forced_keyword_mode_reports_keyword_ranker() {
    assert_eq!(engine(RankerMode::Keyword).ranker_kind(), RankerKind::Keyword);
    assert_eq!(engine(RankerMode::Auto).ranker_kind(), RankerKind::Vector);
}

#[test]
fn empty_corpus_degrades_to_keyword_and_empty_results() {
    let engine = Engine::with_corpus(RetrievalConfig::default(), Corpus::default());
    assert_eq!(engine.ranker_kind(), RankerKind::Keyword);
    assert_eq!(engine.doc_count(), 0);
    assert!(engine.search("anything at all", 3, false).is_empty());
    assert_eq!(engine.relevant_context("anything at all", 2000, false), "");
}

#[test]
fn missing_corpus_file_starts_empty_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let config = RetrievalConfig {
        corpus_path: tmp.path().join("missing.json"),
        ..RetrievalConfig::default()
    };
    let engine = Engine::open(config);
    assert_eq!(engine.doc_count(), 0);
    assert!(engine.search("badge", 3, false).is_empty());
}

#[test]
fn context_contains_heading_and_excerpt() {
    let engine = engine(RankerMode::Auto);
    let context = engine.relevant_context("status badge", 2000, false);
    assert!(context.starts_with("\n\n## Badges\n"));
    assert!(context.contains("Use a badge component"));
    assert!(context.contains("...\n"));
}

#[test]
fn context_never_exceeds_max_length() {
    let long_body = "badge ".repeat(300);
    let corpus = Corpus::from_records(vec![record("Badges", &long_body)]);
    let engine = Engine::with_corpus(RetrievalConfig::default(), corpus);
    for max_length in [10usize, 50, 512, 100_000] {
        let context = engine.relevant_context("badge", max_length, false);
        assert!(context.chars().count() <= max_length);
    }
}

#[test]
fn truncated_context_is_a_prefix_of_the_unbounded_one() {
    let long_body = "badge status ".repeat(100);
    let corpus = Corpus::from_records(vec![record("Badges", &long_body)]);
    let engine = Engine::with_corpus(RetrievalConfig::default(), corpus);
    let unbounded = engine.relevant_context("badge status", 100_000, false);
    let capped = engine.relevant_context("badge status", 50, false);
    assert_eq!(capped.chars().count(), 50);
    assert!(unbounded.starts_with(&capped));
}

#[test]
fn excerpt_is_capped_per_document() {
    let long_body = "badge ".repeat(120);
    let corpus = Corpus::from_records(vec![record("Badges", &long_body)]);
    let engine = Engine::with_corpus(RetrievalConfig::default(), corpus);
    let context = engine.relevant_context("badge", 100_000, false);
    // heading + 500-char excerpt + ellipsis marker
    let expected = format!(
        "\n\n## Badges\n{}...\n",
        long_body.chars().take(500).collect::<String>()
    );
    assert_eq!(context, expected);
}

#[test]
fn verbose_flag_never_changes_results() {
    let engine = engine(RankerMode::Auto);
    let quiet = engine.search("status badge", 3, false);
    let loud = engine.search("status badge", 3, true);
    assert_eq!(quiet.len(), loud.len());
    assert_eq!(
        engine.relevant_context("status badge", 300, false),
        engine.relevant_context("status badge", 300, true)
    );
}

#[test]
fn reload_swaps_the_whole_corpus() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("all_docs.json");
    fs::write(
        &path,
        r#"[{"title": "Deploy", "content": "Deploy the project to an org."}]"#,
    )
    .unwrap();

    let mut engine = engine(RankerMode::Auto);
    assert_eq!(engine.doc_count(), 2);
    engine.reload(&path).expect("reload");
    assert_eq!(engine.doc_count(), 1);
    assert!(engine.search("badge", 3, false).is_empty());
    assert_eq!(engine.search("deploy org", 3, false)[0].document.title, "Deploy");
}

#[test]
fn failed_reload_keeps_previous_state() {
    let tmp = TempDir::new().unwrap();
    let mut engine = engine(RankerMode::Auto);
    assert!(engine.reload(&tmp.path().join("missing.json")).is_err());
    assert_eq!(engine.doc_count(), 2);
    assert_eq!(engine.search("status badge", 1, false)[0].document.title, "Badges");
}
