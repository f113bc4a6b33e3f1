//! Projects parsed records into indexable documents.

use tracing::{debug, warn};

use crate::types::{BusinessDoc, DocMeta, Document, FaqDoc, Record};

/// Business columns that feed the searchable text, in join order.
pub const BUSINESS_TEXT_FIELDS: [&str; 7] = ["name", "category", "summary", "offerings", "keywords", "city", "state"];

/// FAQ columns that feed the searchable text, in join order.
pub const FAQ_TEXT_FIELDS: [&str; 3] = ["topic", "content", "tags"];

pub const BUSINESS_ID_PREFIX: &str = "biz_";
pub const FAQ_ID_PREFIX: &str = "faq_";

pub fn business_document(record: Record) -> Document {
    let id = format!("{}{}", BUSINESS_ID_PREFIX, id_or(&record, "name"));
    let text = join_fields(&record, &BUSINESS_TEXT_FIELDS);
    Document { id, text, meta: DocMeta::Business(BusinessDoc::from_record(record)) }
}

pub fn faq_document(record: Record) -> Document {
    let id = format!("{}{}", FAQ_ID_PREFIX, id_or(&record, "topic"));
    let text = join_fields(&record, &FAQ_TEXT_FIELDS);
    Document { id, text, meta: DocMeta::Faq(FaqDoc::from_record(record)) }
}

/// Business documents first, then FAQ entries, each in source order.
pub fn build_corpus(business: Vec<Record>, faq: Vec<Record>) -> Vec<Document> {
    if business.is_empty() { warn!("business source produced no records"); }
    if faq.is_empty() { warn!("faq source produced no records"); }
    let (n_biz, n_faq) = (business.len(), faq.len());
    let mut documents = Vec::with_capacity(n_biz + n_faq);
    documents.extend(business.into_iter().map(business_document));
    documents.extend(faq.into_iter().map(faq_document));
    debug!(business = n_biz, faq = n_faq, "built corpus");
    documents
}

fn id_or<'r>(record: &'r Record, fallback: &str) -> &'r str {
    match record.get("id") {
        "" => record.get(fallback),
        id => id,
    }
}

fn join_fields(record: &Record, fields: &[&str]) -> String {
    fields.iter().map(|f| record.get(f)).filter(|v| !v.is_empty()).collect::<Vec<_>>().join(" ")
}
