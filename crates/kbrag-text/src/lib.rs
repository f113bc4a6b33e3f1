//! kbrag-text
//!
//! Text normalization shared by indexing and querying: lowercase, split on
//! anything outside `[a-z0-9]`, drop short tokens and stopwords.
pub mod stopwords;
pub mod tokenize;

pub use stopwords::{is_stopword, STOP_WORDS};
pub use tokenize::{term_counts, tokenize, Tokens, MIN_TERM_LEN};
