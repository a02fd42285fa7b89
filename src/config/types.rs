//! Struct definitions and serde defaults for modelsel configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::Variant;

/// Root configuration, deserialized from `config.toml`.
///
/// Every field has a serde default so modelsel runs without a config file.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Which node variant (and built-in catalog) to use. Unset means
    /// [`Variant::default`]; see [`Config::variant`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
    /// Overrides the catalog's default provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    /// Custom catalog TOML replacing the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    /// Per-provider credentials and endpoints, keyed by provider name.
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderSettings>,
    /// Defaults for the API loader.
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl Config {
    /// The configured variant, or the default one when no file sets it.
    pub fn variant(&self) -> Variant {
        self.variant.unwrap_or_default()
    }
}

/// Credentials and endpoint for one provider.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderSettings {
    /// API key. `{env:VAR}` placeholders are expanded on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Endpoint overriding the catalog's `base_url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Loader defaults applied when a request leaves a value unset.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct LoaderConfig {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds.
    pub timeout: Option<u32>,
}
