use std::{env, path::PathBuf, process};

use docbase_core::config::{RankerMode, RetrievalConfig};
use docbase_engine::Engine;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut query = None;
    let mut top_k = None;
    let mut corpus_path = None;
    let mut keyword = false;
    let mut verbose = false;
    let mut json = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--keyword" | "-k" => keyword = true,
            "--verbose" | "-v" => verbose = true,
            "--json" => json = true,
            "--top-k" => {
                if let Some(n) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) {
                    top_k = Some(n);
                    i += 1;
                } else {
                    eprintln!("Error: --top-k requires a number");
                    process::exit(1);
                }
            }
            "--corpus" => {
                if let Some(p) = args.get(i + 1) {
                    corpus_path = Some(PathBuf::from(p));
                    i += 1;
                } else {
                    eprintln!("Error: --corpus requires a path");
                    process::exit(1);
                }
            }
            _ if !args[i].starts_with('-') && query.is_none() => query = Some(args[i].clone()),
            other => {
                eprintln!("Error: unknown flag {other}");
                process::exit(1);
            }
        }
        i += 1;
    }
    let Some(query) = query else {
        eprintln!("Usage: docbase-search <query> [--top-k N] [--corpus PATH] [--keyword] [--verbose] [--json]");
        process::exit(1);
    };

    let mut config = RetrievalConfig::load().unwrap_or_else(|e| {
        eprintln!("Error loading config, using defaults: {e}");
        RetrievalConfig::default()
    });
    if let Some(path) = corpus_path {
        config.corpus_path = path;
    }
    if keyword {
        config.ranker = RankerMode::Keyword;
    }
    let top_k = top_k.unwrap_or(config.search_top_k);

    let engine = Engine::open(config);
    let results = engine.search(&query, top_k, verbose);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("docbase-search ({} docs, {:?} ranker)", engine.doc_count(), engine.ranker_kind());
    println!("Found {} results for: \"{}\"", results.len(), query);
    for (i, result) in results.iter().enumerate() {
        println!(
            "\n  {}. score={:.4}  id={}  title={}",
            i + 1,
            result.score,
            result.document.id,
            result.document.title
        );
    }
    Ok(())
}
