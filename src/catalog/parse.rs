//! Building and validating catalogs from TOML.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::types::{CatalogFile, ProviderCatalog, ProviderEntry};
use crate::constants::DEFAULT_PROVIDER;
use crate::error::CatalogError;

impl ProviderCatalog {
    /// Builds a catalog from entries, checking that names are unique and the
    /// default provider is one of them.
    pub fn new(default_provider: &str, entries: Vec<ProviderEntry>) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(CatalogError::DuplicateProvider(entry.name.clone()));
            }
        }
        if !seen.contains(default_provider) {
            return Err(CatalogError::UnknownDefault(default_provider.to_string()));
        }
        Ok(Self {
            default_provider: default_provider.to_string(),
            entries,
        })
    }

    /// Parses a catalog from TOML text.
    ///
    /// When the file names no `default_provider`, [`DEFAULT_PROVIDER`] is used
    /// if listed, otherwise the first provider.
    pub fn from_toml(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        let default = match file.default_provider {
            Some(name) => name,
            None => file
                .providers
                .iter()
                .find(|e| e.name == DEFAULT_PROVIDER)
                .or_else(|| file.providers.first())
                .map(|e| e.name.clone())
                .ok_or(CatalogError::Empty)?,
        };
        Self::new(&default, file.providers)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml(&contents)?;
        tracing::debug!(path = %path.display(), providers = catalog.len(), "loaded catalog");
        Ok(catalog)
    }

    /// Renders the catalog back to TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let file = CatalogFile {
            default_provider: Some(self.default_provider.clone()),
            providers: self.entries.clone(),
        };
        toml::to_string_pretty(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ModelList;

    const MIXED: &str = r#"
default_provider = "B"

[[providers]]
name = "A"
models = ["x", "y"]

[[providers]]
name = "B"
base_url = "https://b.example/v1"

[providers.models]
t2t_models = ["b1"]
ti2t_models = []
"#;

    #[test]
    fn test_parse_flat_and_roles() {
        let catalog = ProviderCatalog::from_toml(MIXED).unwrap();
        assert_eq!(catalog.default_provider(), "B");
        assert_eq!(catalog.provider_names().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(
            catalog.get("A").unwrap().models,
            ModelList::Flat(vec!["x".into(), "y".into()])
        );
        let b = catalog.get("B").unwrap();
        assert_eq!(b.base_url.as_deref(), Some("https://b.example/v1"));
        assert_eq!(b.models.models_for(Some("t2t_models")), ["b1"]);
        assert!(b.models.models_for(Some("ti2t_models")).is_empty());
    }

    #[test]
    fn test_default_provider_falls_back_to_first() {
        let catalog = ProviderCatalog::from_toml(
            "[[providers]]\nname = \"Z\"\nmodels = []\n\n[[providers]]\nname = \"Y\"\nmodels = [\"m\"]\n",
        )
        .unwrap();
        assert_eq!(catalog.default_provider(), "Z");
        assert!(catalog.get("Z").unwrap().models.models_for(None).is_empty());
    }

    #[test]
    fn test_default_provider_prefers_well_known() {
        let catalog = ProviderCatalog::from_toml(
            "[[providers]]\nname = \"Z\"\nmodels = []\n\n[[providers]]\nname = \"DeepSeek (Official)\"\nmodels = [\"deepseek-chat\"]\n",
        )
        .unwrap();
        assert_eq!(catalog.default_provider(), DEFAULT_PROVIDER);
    }

    #[test]
    fn test_duplicate_provider_rejected() {
        let err = ProviderCatalog::from_toml(
            "[[providers]]\nname = \"A\"\nmodels = []\n\n[[providers]]\nname = \"A\"\nmodels = []\n",
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateProvider(ref n) if n == "A"));
    }

    #[test]
    fn test_unknown_default_rejected() {
        let err = ProviderCatalog::from_toml(
            "default_provider = \"nope\"\n\n[[providers]]\nname = \"A\"\nmodels = []\n",
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDefault(_)));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            ProviderCatalog::from_toml("").unwrap_err(),
            CatalogError::Empty
        ));
    }

    #[test]
    fn test_toml_round_trip_preserves_order() {
        let catalog = ProviderCatalog::from_toml(MIXED).unwrap();
        let rendered = catalog.to_toml().unwrap();
        assert_eq!(ProviderCatalog::from_toml(&rendered).unwrap(), catalog);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ProviderCatalog::from_path(Path::new("/nonexistent/catalog_xyz.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
