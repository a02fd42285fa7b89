//! Typed errors for the fallible edges of modelsel.
//!
//! The binder itself never fails. Catalog loading and loader validation do,
//! and callers match on these; the CLI layer wraps them in `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or validating a provider catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("provider '{0}' is listed more than once")]
    DuplicateProvider(String),

    #[error("default provider '{0}' is not in the catalog")]
    UnknownDefault(String),

    #[error("catalog has no providers")]
    Empty,
}

/// Errors raised while turning a node selection into a [`ModelConfig`](crate::loader::ModelConfig).
#[derive(Debug, Error, PartialEq)]
pub enum LoaderError {
    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        name: &'static str,
        value: String,
        min: String,
        max: String,
    },
}
