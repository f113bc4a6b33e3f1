//! Domain types shared by the parser, the indexer and the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type DocId = String;

/// One data row keyed by header column name.
///
/// Values are trimmed by the parser. Looking up a column the header never
/// defined yields `""`, so a missing column and an empty cell read the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn get(&self, column: &str) -> &str {
        self.0.get(column).map_or("", String::as_str)
    }

    pub fn has_column(&self, column: &str) -> bool { self.0.contains_key(column) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A row from the business directory source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDoc {
    pub name: String,
    pub category: String,
    pub summary: String,
    pub offerings: String,
    pub keywords: String,
    pub city: String,
    pub state: String,
    pub record: Record,
}

impl BusinessDoc {
    pub fn from_record(record: Record) -> Self {
        Self {
            name: record.get("name").to_string(),
            category: record.get("category").to_string(),
            summary: record.get("summary").to_string(),
            offerings: record.get("offerings").to_string(),
            keywords: record.get("keywords").to_string(),
            city: record.get("city").to_string(),
            state: record.get("state").to_string(),
            record,
        }
    }
}

/// A row from the FAQ knowledge base source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqDoc {
    pub topic: String,
    pub content: String,
    pub tags: String,
    pub record: Record,
}

impl FaqDoc {
    pub fn from_record(record: Record) -> Self {
        Self {
            topic: record.get("topic").to_string(),
            content: record.get("content").to_string(),
            tags: record.get("tags").to_string(),
            record,
        }
    }
}

/// Per-document metadata, discriminated by source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DocMeta {
    Business(BusinessDoc),
    Faq(FaqDoc),
    /// Text indexed without a record behind it.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Business,
    Faq,
    Plain,
}

impl DocKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Business => "business",
            DocKind::Faq => "faq",
            DocKind::Plain => "plain",
        }
    }
}

impl DocMeta {
    pub fn kind(&self) -> DocKind {
        match self {
            DocMeta::Business(_) => DocKind::Business,
            DocMeta::Faq(_) => DocKind::Faq,
            DocMeta::Plain => DocKind::Plain,
        }
    }
}

/// The unit of indexing.
///
/// - `id`: source-tagged identifier (`biz_…`, `faq_…`); collisions are allowed
/// - `text`: the space-joined searchable fields
/// - `meta`: typed fields plus the original record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
    pub meta: DocMeta,
}

impl Document {
    pub fn plain(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: id.into(), text: text.into(), meta: DocMeta::Plain }
    }

    pub fn kind(&self) -> DocKind { self.meta.kind() }
}

/// A ranked document that survived the score threshold.
///
/// `rank` is 1-based. `score` is the cosine similarity against the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hit<'a> {
    pub rank: usize,
    pub score: f64,
    pub document: &'a Document,
}

/// What the engine hands back to a caller for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    pub sources: Vec<String>,
}
