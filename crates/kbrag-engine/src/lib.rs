//! kbrag-engine
//!
//! The boundary a front end talks to: `Engine::init` loads the business and
//! FAQ sources and builds the index, `Engine::query` answers free text against
//! it. The index is shared read-only behind an `Arc`; reloading means building
//! a new `Engine` and replacing the old value.
pub mod answer;
pub mod loader;

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::info;

use kbrag_core::config::SourcesConfig;
use kbrag_core::data_processor::build_corpus;
use kbrag_core::error::{LoadError, ParseError};
use kbrag_core::table;
use kbrag_core::traits::Retriever;
use kbrag_core::types::{Answer, Document, Hit, Record};
use kbrag_index::{TfIdfIndex, DEFAULT_K};

pub use answer::format_answer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    pub k: NonZeroUsize,
}

impl Default for QueryOptions {
    fn default() -> Self { Self { k: DEFAULT_K } }
}

impl QueryOptions {
    pub fn new(k: NonZeroUsize) -> Self { Self { k } }
}

#[derive(Debug, Clone)]
pub struct Engine {
    index: Arc<TfIdfIndex>,
}

impl Engine {
    /// Read both sources, then build. Nothing is built unless both sources
    /// load and parse.
    pub async fn init(sources: &SourcesConfig) -> Result<Self, LoadError> {
        info!(business = %sources.business_csv.display(), faq = %sources.faq_csv.display(), "loading sources");
        let (business, faq) = loader::load_sources(sources).await?;
        Ok(Self::from_records(business, faq))
    }

    /// Build from in-memory payloads, e.g. sources fetched by the caller.
    pub fn from_sources(business_text: &str, faq_text: &str) -> Result<Self, ParseError> {
        let business = table::parse(business_text)?;
        let faq = table::parse(faq_text)?;
        Ok(Self::from_records(business, faq))
    }

    pub fn from_records(business: Vec<Record>, faq: Vec<Record>) -> Self {
        Self::from_documents(build_corpus(business, faq))
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { index: Arc::new(TfIdfIndex::build(documents)) }
    }

    pub fn index(&self) -> &TfIdfIndex { &self.index }

    /// Ranked hits without the answer template.
    pub fn search(&self, text: &str, k: NonZeroUsize) -> Vec<Hit<'_>> { self.index.retrieve(text, k) }

    pub fn query(&self, text: &str, options: QueryOptions) -> Answer {
        let hits = self.search(text, options.k);
        format_answer(text, &hits)
    }
}
