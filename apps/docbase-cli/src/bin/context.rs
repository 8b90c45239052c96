use std::{env, path::PathBuf, process};

use docbase_core::config::{RankerMode, RetrievalConfig};
use docbase_engine::Engine;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let mut query = None;
    let mut max_length = 2000usize;
    let mut corpus_path = None;
    let mut keyword = false;
    let mut verbose = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--keyword" | "-k" => keyword = true,
            "--verbose" | "-v" => verbose = true,
            "--max-length" => {
                if let Some(n) = args.get(i + 1).and_then(|v| v.parse::<usize>().ok()) {
                    max_length = n;
                    i += 1;
                } else {
                    eprintln!("Error: --max-length requires a number");
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
        eprintln!("Usage: docbase-context <query> [--max-length N] [--corpus PATH] [--keyword] [--verbose]");
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

    let engine = Engine::open(config);
    let context = engine.relevant_context(&query, max_length, verbose);
    if context.is_empty() {
        eprintln!("No relevant context for: \"{query}\"");
    } else {
        println!("{context}");
    }
    Ok(())
}
