//! Struct definitions for provider catalogs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Models a provider offers, either as one list or split by role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelList {
    /// One ordered list, used by nodes with a single model selector.
    Flat(Vec<String>),
    /// Named lists (e.g. `t2t_models`, `ti2t_models`), one per dependent selector.
    Roles(BTreeMap<String, Vec<String>>),
}

impl ModelList {
    /// Returns the models for `field`.
    ///
    /// `None` asks for the flat list, `Some(name)` for a named role. Asking a
    /// flat list for a role (or a role map for the flat list) yields nothing,
    /// as does a role the provider does not list.
    pub fn models_for(&self, field: Option<&str>) -> &[String] {
        match (self, field) {
            (ModelList::Flat(models), None) => models,
            (ModelList::Roles(roles), Some(name)) => {
                roles.get(name).map(Vec::as_slice).unwrap_or(&[])
            }
            _ => &[],
        }
    }
}

/// One provider and the models it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    /// Display name, also the value of the provider selector.
    pub name: String,
    /// Default API endpoint for this provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the API key, when it differs from
    /// the `<NAME>_API_KEY` convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub models: ModelList,
}

impl ProviderEntry {
    /// Creates an entry with a flat model list.
    #[allow(dead_code)]
    pub fn flat<I, S>(name: &str, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            base_url: None,
            api_key_env: None,
            models: ModelList::Flat(models.into_iter().map(Into::into).collect()),
        }
    }

    /// Creates an entry with role-keyed model lists.
    #[allow(dead_code)]
    pub fn with_roles<I, S>(name: &str, roles: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: Into<String>,
    {
        let roles = roles
            .into_iter()
            .map(|(role, models)| (role.into(), models.into_iter().map(Into::into).collect()))
            .collect();
        Self {
            name: name.to_string(),
            base_url: None,
            api_key_env: None,
            models: ModelList::Roles(roles),
        }
    }

    /// Environment variable consulted for this provider's API key.
    ///
    /// Uses `api_key_env` when set, otherwise the first ASCII word of the
    /// name: `"DeepSeek (Official)"` → `DEEPSEEK_API_KEY`.
    pub fn api_key_var(&self) -> Option<String> {
        if let Some(ref var) = self.api_key_env {
            return Some(var.clone());
        }
        self.name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find(|word| !word.is_empty())
            .map(|word| format!("{}_API_KEY", word.to_ascii_uppercase()))
    }
}

/// On-disk shape of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
pub(super) struct CatalogFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,
}

/// Ordered, immutable mapping from provider name to its models.
///
/// Built once (from an embedded table or a TOML file) and shared read-only
/// with every binder that needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCatalog {
    pub(super) default_provider: String,
    pub(super) entries: Vec<ProviderEntry>,
}

impl ProviderCatalog {
    /// Looks up a provider by exact name.
    pub fn get(&self, name: &str) -> Option<&ProviderEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Whether `name` is a catalog key.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The catalog's own default provider key.
    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Provider names in catalog order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Models of `field` across every provider, de-duplicated, first occurrence wins.
    pub fn all_models(&self, field: Option<&str>) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .flat_map(|e| e.models.models_for(field))
            .filter(|m| seen.insert(m.as_str()))
            .cloned()
            .collect()
    }
}
