//! docbase-vector
//!
//! Tf-idf indexing and cosine-similarity ranking. The index is built once
//! from the full corpus and is read-only afterwards; rebuilding means
//! building a fresh index and swapping it in. See `index` and `search`.

pub mod index;
pub mod search;
pub mod vocab;

pub use index::TfidfIndex;
pub use search::TfidfRanker;
