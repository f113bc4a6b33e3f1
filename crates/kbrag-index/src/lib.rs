//! kbrag-index
//!
//! In-memory TF-IDF index over documents and cosine-ranked search against it.
//! See `index` for construction and `search` for query scoring.
pub mod index;
pub mod search;

pub use index::{smoothed_idf, tf_weight, IndexedDocument, TermVector, TfIdfIndex};
pub use search::{cosine_similarity, DEFAULT_K, SCORE_THRESHOLD};
