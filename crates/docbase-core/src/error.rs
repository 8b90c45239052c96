use thiserror::Error;

/// Retrieval errors. None of these are fatal to a caller: a missing corpus
/// degrades to an empty engine and a missing index degrades to keyword
/// ranking.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Vector indexing unavailable: {0}")]
    IndexingUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
