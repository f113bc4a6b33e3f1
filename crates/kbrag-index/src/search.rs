use std::num::NonZeroUsize;

use tracing::debug;

use kbrag_core::traits::Retriever;
use kbrag_core::types::{Document, Hit};
use kbrag_text::term_counts;

use crate::index::{TermVector, TfIdfIndex};

/// Hits scoring at or below this are treated as noise.
pub const SCORE_THRESHOLD: f64 = 0.08;

/// Three hits unless the caller asks otherwise.
pub const DEFAULT_K: NonZeroUsize = NonZeroUsize::MIN.saturating_add(2);

/// `dot(a, b) / (|a| * |b|)`. Norms are floored at 1 for empty vectors, so
/// this is always finite.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 { a.dot(b) / (a.norm() * b.norm()) }

impl TfIdfIndex {
    /// Weight `text` against the corpus idf table without touching it.
    pub fn vectorize_query(&self, text: &str) -> TermVector { TermVector::from_counts(&term_counts(text), self.idf_table()) }

    /// Score every document, rank by descending score, drop hits at or below
    /// [`SCORE_THRESHOLD`] and keep the first `k`. Equal scores keep
    /// ingestion order.
    pub fn search(&self, query: &str, k: NonZeroUsize) -> Vec<Hit<'_>> {
        let q = self.vectorize_query(query);
        let mut scored: Vec<(f64, &Document)> = self
            .entries()
            .iter()
            .map(|e| (cosine_similarity(&q, &e.vector), &e.document))
            .collect();
        // sort_by is stable; ties stay in document order.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let hits: Vec<Hit<'_>> = scored
            .into_iter()
            .filter(|(score, _)| *score > SCORE_THRESHOLD)
            .take(k.get())
            .enumerate()
            .map(|(i, (score, document))| Hit { rank: i + 1, score, document })
            .collect();
        debug!(query, terms = q.len(), hits = hits.len(), "searched index");
        hits
    }
}

impl Retriever for TfIdfIndex {
    fn retrieve(&self, query: &str, k: NonZeroUsize) -> Vec<Hit<'_>> { self.search(query, k) }
}
