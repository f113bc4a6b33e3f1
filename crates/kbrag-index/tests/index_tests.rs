use std::num::NonZeroUsize;

use kbrag_core::traits::Retriever;
use kbrag_core::types::Document;
use kbrag_index::{cosine_similarity, smoothed_idf, tf_weight, TermVector, TfIdfIndex, DEFAULT_K, SCORE_THRESHOLD};

fn k(n: usize) -> NonZeroUsize { NonZeroUsize::new(n).unwrap() }

fn docs(texts: &[&str]) -> Vec<Document> {
    texts.iter().enumerate().map(|(i, t)| Document::plain(format!("d{}", i), *t)).collect()
}

fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

#[test]
fn idf_uses_smoothed_formula() {
    let index = TfIdfIndex::build(docs(&["apple banana", "apple cherry", "durian"]));
    assert_eq!(index.doc_count(), 3);
    assert_eq!(index.vocabulary_size(), 4);
    assert!(close(index.idf("apple").unwrap(), (4.0f64 / 3.0).ln() + 1.0));
    assert!(close(index.idf("banana").unwrap(), 2.0f64.ln() + 1.0));
    assert!(close(smoothed_idf(3, 3), 1.0), "a term in every document keeps weight 1");
    assert!(index.idf("the").is_none());
}

#[test]
fn document_weights_are_sublinear_tf_times_idf() {
    let index = TfIdfIndex::build(docs(&["fees fees fees pricing", "custody"]));
    let v = &index.entries()[0].vector;
    let idf = smoothed_idf(2, 1);
    assert!(close(tf_weight(3), 1.0 + 3.0f64.ln()));
    assert!(close(v.weight("fees"), tf_weight(3) * idf));
    assert!(close(v.weight("pricing"), idf));
    let norm = (v.weight("fees").powi(2) + v.weight("pricing").powi(2)).sqrt();
    assert!(close(v.norm(), norm));
}

#[test]
fn every_vector_term_has_idf_and_idf_has_no_orphans() {
    let index = TfIdfIndex::build(docs(&["flat fees for consultations", "custody divorce Austin", "", "the and of"]));
    let mut seen = std::collections::BTreeSet::new();
    for e in index.entries() {
        for t in e.vector.terms() {
            assert!(index.idf(t).is_some());
            seen.insert(t.to_string());
        }
    }
    let idf_terms: std::collections::BTreeSet<String> = index.idf_table().keys().cloned().collect();
    assert_eq!(seen, idf_terms);
}

#[test]
fn empty_documents_get_unit_norm() {
    let index = TfIdfIndex::build(docs(&["", "the of and", "custody"]));
    assert!(index.entries()[0].vector.is_empty());
    assert_eq!(index.entries()[0].vector.norm(), 1.0);
    assert_eq!(index.entries()[1].vector.norm(), 1.0);
    assert_eq!(TermVector::default().norm(), 1.0);
}

#[test]
fn building_twice_is_bit_identical() {
    let texts = ["Acme Law Family Law Divorce custody", "Fees flat fees consultations", "real estate closing fees"];
    let a = TfIdfIndex::build(docs(&texts));
    let b = TfIdfIndex::build(docs(&texts));
    assert_eq!(a, b);
    for (x, y) in a.entries().iter().zip(b.entries()) {
        assert_eq!(x.vector.norm().to_bits(), y.vector.norm().to_bits());
        for (term, w) in x.vector.weights() { assert_eq!(w.to_bits(), y.vector.weight(term).to_bits()); }
    }
}

#[test]
fn self_similarity_is_one_and_maximal() {
    let index = TfIdfIndex::build(docs(&[
        "acme law family law divorce custody austin",
        "fees flat fees consultations pricing",
        "real estate closing title custody",
    ]));
    for e in index.entries() {
        let own = cosine_similarity(&e.vector, &e.vector);
        assert!((own - 1.0).abs() < 1e-12);
        for q in ["custody", "fees law", "real estate title closing", "acme"] {
            let qv = index.vectorize_query(q);
            assert!(cosine_similarity(&qv, &e.vector) <= own + 1e-12);
        }
    }
}

#[test]
fn unseen_query_terms_are_ignored() {
    let index = TfIdfIndex::build(docs(&["custody divorce", "fees pricing"]));
    let q = index.vectorize_query("custody zebra quantum");
    assert_eq!(q.len(), 1);
    assert_eq!(q.weight("zebra"), 0.0);
    assert!(index.idf("zebra").is_none(), "queries never grow the idf table");
    assert!(index.search("zebra quantum", DEFAULT_K).is_empty());
}

#[test]
fn results_rank_descending_and_respect_threshold() {
    let index = TfIdfIndex::build(docs(&[
        "custody",
        "custody divorce mediation",
        "fees pricing",
        "custody divorce mediation adoption guardianship support",
    ]));
    let hits = index.search("custody", k(10));
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].document.id, "d0");
    for pair in hits.windows(2) { assert!(pair[0].score >= pair[1].score); }
    for (i, h) in hits.iter().enumerate() {
        assert_eq!(h.rank, i + 1);
        assert!(h.score > SCORE_THRESHOLD);
    }
}

#[test]
fn weak_single_term_overlap_falls_below_threshold() {
    let filler = |n: usize| (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ");
    // One document, so idf is 1 for every term and the score is 1/sqrt(terms).
    let long = TfIdfIndex::build(vec![Document::plain("long", format!("alpha {}", filler(199)))]);
    assert!(long.search("alpha", DEFAULT_K).is_empty());

    let shorter = TfIdfIndex::build(vec![Document::plain("short", format!("alpha {}", filler(100)))]);
    let hits = shorter.search("alpha", DEFAULT_K);
    assert_eq!(hits.len(), 1);
    assert!((hits[0].score - 1.0 / 101f64.sqrt()).abs() < 1e-9);
}

#[test]
fn ties_keep_ingestion_order() {
    let index = TfIdfIndex::build(docs(&["custody law", "fees", "custody law", "custody law"]));
    let hits = index.search("custody", k(5));
    let ids: Vec<&str> = hits.iter().map(|h| h.document.id.as_str()).collect();
    assert_eq!(ids, ["d0", "d2", "d3"]);
    assert_eq!(hits[0].score.to_bits(), hits[2].score.to_bits());
}

#[test]
fn larger_k_extends_the_ranked_prefix() {
    let index = TfIdfIndex::build(docs(&[
        "custody divorce",
        "custody mediation",
        "custody fees",
        "custody adoption support",
        "divorce fees",
        "pricing",
    ]));
    let all = index.search("custody divorce fees", k(10));
    assert!(all.len() >= 4);
    for n in 1..=all.len() {
        let top = index.search("custody divorce fees", k(n));
        assert_eq!(top.len(), n);
        for (a, b) in top.iter().zip(&all) { assert_eq!(a.document.id, b.document.id); }
    }
}

#[test]
fn empty_query_and_empty_index_yield_no_hits() {
    let index = TfIdfIndex::build(docs(&["custody divorce"]));
    assert!(index.search("", DEFAULT_K).is_empty());
    assert!(index.search("   ", DEFAULT_K).is_empty());
    assert!(index.search("the and of", DEFAULT_K).is_empty());

    let empty = TfIdfIndex::build(Vec::new());
    assert!(empty.is_empty());
    assert!(empty.search("custody", DEFAULT_K).is_empty());
}

#[test]
fn retriever_trait_matches_search() {
    let index = TfIdfIndex::build(docs(&["custody divorce", "fees pricing"]));
    let via_trait = index.retrieve("fees", DEFAULT_K);
    let direct = index.search("fees", DEFAULT_K);
    assert_eq!(via_trait, direct);
    assert_eq!(DEFAULT_K.get(), 3);
}
