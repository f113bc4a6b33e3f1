use std::collections::BTreeMap;

use tracing::info;

use kbrag_core::types::Document;
use kbrag_text::term_counts;

/// Sublinear term frequency: `1 + ln(count)`.
pub fn tf_weight(count: u32) -> f64 { 1.0 + f64::from(count).ln() }

/// Smoothed inverse document frequency: `ln((n + 1) / (df + 1)) + 1`.
///
/// Always >= 1 for `df <= n`, so a term found in every document keeps a
/// non-zero weight.
pub fn smoothed_idf(doc_count: usize, df: usize) -> f64 {
    ((doc_count as f64 + 1.0) / (df as f64 + 1.0)).ln() + 1.0
}

/// Sparse weight vector with its Euclidean norm.
///
/// Terms are kept ordered so sums over the vector run in the same order on
/// every build. The norm is never zero: an empty vector reports 1.
#[derive(Debug, Clone, PartialEq)]
pub struct TermVector {
    weights: BTreeMap<String, f64>,
    norm: f64,
}

impl Default for TermVector {
    fn default() -> Self { Self { weights: BTreeMap::new(), norm: 1.0 } }
}

impl TermVector {
    /// Weight raw counts by `idf`. Terms with no `idf` entry are left out.
    pub fn from_counts(counts: &BTreeMap<String, u32>, idf: &BTreeMap<String, f64>) -> Self {
        let weights: BTreeMap<String, f64> = counts
            .iter()
            .filter_map(|(term, &count)| idf.get(term).map(|w| (term.clone(), tf_weight(count) * w)))
            .collect();
        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        Self { weights, norm: if norm > 0.0 { norm } else { 1.0 } }
    }

    pub fn weight(&self, term: &str) -> f64 { self.weights.get(term).copied().unwrap_or(0.0) }

    pub fn weights(&self) -> &BTreeMap<String, f64> { &self.weights }

    pub fn terms(&self) -> impl Iterator<Item = &str> { self.weights.keys().map(String::as_str) }

    pub fn norm(&self) -> f64 { self.norm }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    /// Sum over `self`'s terms, in term order.
    pub fn dot(&self, other: &TermVector) -> f64 {
        self.weights.iter().filter_map(|(term, w)| other.weights.get(term).map(|o| w * o)).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedDocument {
    pub vector: TermVector,
    pub document: Document,
}

/// Immutable TF-IDF index. Entries keep ingestion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TfIdfIndex {
    entries: Vec<IndexedDocument>,
    idf: BTreeMap<String, f64>,
    doc_count: usize,
}

impl TfIdfIndex {
    pub fn build(documents: Vec<Document>) -> Self {
        let doc_count = documents.len();
        let counts: Vec<BTreeMap<String, u32>> = documents.iter().map(|d| term_counts(&d.text)).collect();

        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in &counts {
            for term in tf.keys() { *df.entry(term.as_str()).or_insert(0) += 1; }
        }
        let idf: BTreeMap<String, f64> = df
            .into_iter()
            .map(|(term, n)| (term.to_string(), smoothed_idf(doc_count, n)))
            .collect();

        let entries: Vec<IndexedDocument> = documents
            .into_iter()
            .zip(&counts)
            .map(|(document, tf)| IndexedDocument { vector: TermVector::from_counts(tf, &idf), document })
            .collect();

        info!(documents = doc_count, vocabulary = idf.len(), "built tf-idf index");
        Self { entries, idf, doc_count }
    }

    pub fn doc_count(&self) -> usize { self.doc_count }

    pub fn is_empty(&self) -> bool { self.doc_count == 0 }

    pub fn vocabulary_size(&self) -> usize { self.idf.len() }

    pub fn idf(&self, term: &str) -> Option<f64> { self.idf.get(term).copied() }

    pub fn idf_table(&self) -> &BTreeMap<String, f64> { &self.idf }

    pub fn entries(&self) -> &[IndexedDocument] { &self.entries }

    pub fn documents(&self) -> impl Iterator<Item = &Document> { self.entries.iter().map(|e| &e.document) }
}
