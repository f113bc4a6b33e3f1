use std::num::NonZeroUsize;

use crate::types::Hit;

/// Ranks indexed documents against free text.
///
/// Implementations are read-only over their index, so one value can serve
/// concurrent callers without coordination.
pub trait Retriever: Send + Sync {
    fn retrieve(&self, query: &str, k: NonZeroUsize) -> Vec<Hit<'_>>;
}
