//! Retrieval configuration and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars over built-in defaults. The corpus path accepts `~` and `${VAR}`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// How the engine picks its ranking strategy at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankerMode {
    /// Vector ranking when the index builds, keyword fallback otherwise.
    Auto,
    /// Always use the lexical-overlap ranker.
    Keyword,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Persisted corpus, a JSON array of `{title, content, ...}` records.
    pub corpus_path: PathBuf,
    /// Vocabulary size cap for the tf-idf index.
    pub max_features: usize,
    /// Minimum relevance; results at or below this are discarded.
    pub score_threshold: f32,
    /// Default result count for `search`.
    pub search_top_k: usize,
    /// Result count used internally by context assembly.
    pub context_top_k: usize,
    /// Per-document excerpt length (characters) for context assembly.
    pub excerpt_chars: usize,
    pub ranker: RankerMode,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("knowledge_base/processed/all_docs.json"),
            max_features: 1000,
            score_threshold: 0.1,
            search_top_k: 3,
            context_top_k: 5,
            excerpt_chars: 500,
            ranker: RankerMode::Auto,
        }
    }
}

impl RetrievalConfig {
    /// Merge `config.toml`, the `RUST_ENV`-selected override file and
    /// `APP_*` env vars over the defaults. Missing files are fine.
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment =
            Figment::from(Serialized::defaults(Self::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        let mut config: Self = figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.corpus_path = expand_path(config.corpus_path.to_string_lossy());
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be positive".into()));
        }
        if !self.score_threshold.is_finite() || self.score_threshold < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "score_threshold must be finite and non-negative, got {}",
                self.score_threshold
            )));
        }
        if self.excerpt_chars == 0 {
            return Err(Error::InvalidConfig("excerpt_chars must be positive".into()));
        }
        Ok(())
    }
}

/// Expand `~` and `${VAR}`/`$VAR` in a user-provided path string. No
/// canonicalisation; a missing variable leaves the string as written.
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
