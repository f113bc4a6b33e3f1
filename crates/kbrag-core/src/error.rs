use std::path::PathBuf;
use thiserror::Error;

/// Raised by the tabular parser. The parser is lenient, so in practice this
/// only fires when a payload has no usable header row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no header row")]
    MissingHeader,

    #[error("malformed delimited text: {0}")]
    Malformed(String),
}

/// Failure to bring one of the record sources into memory.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Load(#[from] LoadError),
}

pub type Result<T> = std::result::Result<T, Error>;
