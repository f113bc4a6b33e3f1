use std::path::Path;

use tracing::info;

use kbrag_core::config::SourcesConfig;
use kbrag_core::error::LoadError;
use kbrag_core::table;
use kbrag_core::types::Record;

pub async fn read_source(path: &Path) -> Result<String, LoadError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;
    info!(path = %path.display(), bytes = raw.len(), "read source");
    Ok(raw)
}

pub fn parse_source(path: &Path, raw: &str) -> Result<Vec<Record>, LoadError> {
    table::parse(raw).map_err(|source| LoadError::Parse { path: path.to_path_buf(), source })
}

/// Read both sources concurrently. Either failure fails the pair.
pub async fn load_sources(sources: &SourcesConfig) -> Result<(Vec<Record>, Vec<Record>), LoadError> {
    let (business_raw, faq_raw) =
        futures::future::try_join(read_source(&sources.business_csv), read_source(&sources.faq_csv)).await?;
    let business = parse_source(&sources.business_csv, &business_raw)?;
    let faq = parse_source(&sources.faq_csv, &faq_raw)?;
    Ok((business, faq))
}
