//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Nested keys come from double underscores, so `APP_DATA__BUSINESS_CSV`
//! overrides `data.business_csv`. Source paths are expanded (`~`, `${VAR}`)
//! and resolved against the directory the config was loaded from.
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_BUSINESS_CSV: &str = "data/business.csv";
pub const DEFAULT_FAQ_CSV: &str = "data/faq_kb.csv";
pub const DEFAULT_TOP_K: usize = 3;

/// Where the two record sources live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub business_csv: PathBuf,
    pub faq_csv: PathBuf,
}

impl SourcesConfig {
    pub fn new(business_csv: impl Into<PathBuf>, faq_csv: impl Into<PathBuf>) -> Self {
        Self { business_csv: business_csv.into(), faq_csv: faq_csv.into() }
    }
}

pub struct Config {
    figment: Figment,
    base_dir: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        let base_dir = env::current_dir().map_err(|e| Error::InvalidConfig(format!("Failed to resolve working directory: {}", e)))?;
        Self::load_from(&base_dir)
    }

    /// Load with config files looked up in `dir` instead of the working directory.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self::from_figment(figment, dir);
        config.validate_for_env(&env_name)?;
        Ok(config)
    }

    pub fn from_figment(figment: Figment, base_dir: &Path) -> Self {
        Self { figment, base_dir: base_dir.to_path_buf() }
    }

    /// Extract `key`; an absent key yields `default`. A present key with the
    /// wrong type is still an error.
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.figment.extract_inner(key) {
            Ok(value) => Ok(value),
            Err(e) if e.missing() => Ok(default),
            Err(e) => Err(Error::InvalidConfig(format!("Failed to get '{}': {}", key, e))),
        }
    }

    pub fn sources(&self) -> Result<SourcesConfig> {
        let business: String = self.get_or("data.business_csv", DEFAULT_BUSINESS_CSV.to_string())?;
        let faq: String = self.get_or("data.faq_csv", DEFAULT_FAQ_CSV.to_string())?;
        Ok(SourcesConfig::new(resolve_with_base(&self.base_dir, business), resolve_with_base(&self.base_dir, faq)))
    }

    pub fn top_k(&self) -> Result<NonZeroUsize> {
        let k: usize = self.get_or("query.top_k", DEFAULT_TOP_K)?;
        NonZeroUsize::new(k).ok_or_else(|| Error::InvalidConfig("query.top_k must be at least 1".to_string()))
    }

    fn validate_for_env(&self, env: &str) -> Result<()> {
        self.top_k()?;
        let sources = self.sources()?;
        if matches!(env, "prod" | "production") {
            for path in [&sources.business_csv, &sources.faq_csv] {
                if !path.is_file() {
                    return Err(Error::InvalidConfig(format!("source file {} does not exist", path.display())));
                }
            }
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
