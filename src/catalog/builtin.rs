//! Catalogs compiled into the binary.
//!
//! The tables live as TOML under `catalogs/` and are embedded at build time,
//! one per node variant.

use serde::{Deserialize, Serialize};

use super::types::ProviderCatalog;
use crate::constants::{API_LOADER_NODE, MODEL_SELECTOR_NODE};
use crate::error::CatalogError;

const API_LOADER_CATALOG: &str = include_str!("../../catalogs/api_loader.toml");
const MODEL_SELECTOR_CATALOG: &str = include_str!("../../catalogs/model_selector.toml");

/// Which kind of node a catalog and binding are meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Provider + `t2t_model` / `ti2t_model` selectors.
    #[default]
    ApiLoader,
    /// Provider + single `model` selector.
    ModelSelector,
}

impl Variant {
    /// Node type name this variant binds to.
    pub fn node_type(self) -> &'static str {
        match self {
            Variant::ApiLoader => API_LOADER_NODE,
            Variant::ModelSelector => MODEL_SELECTOR_NODE,
        }
    }

    /// Parses the embedded catalog for this variant.
    pub fn builtin_catalog(self) -> Result<ProviderCatalog, CatalogError> {
        let source = match self {
            Variant::ApiLoader => API_LOADER_CATALOG,
            Variant::ModelSelector => MODEL_SELECTOR_CATALOG,
        };
        ProviderCatalog::from_toml(source)
    }
}
