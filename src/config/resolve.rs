//! Environment variable substitution and per-provider lookups.

use super::types::Config;
use crate::binder::BindingSpec;
use crate::catalog::ProviderCatalog;
use crate::error::CatalogError;

const ENV_OPEN: &str = "{env:";

/// Expands every `{env:VAR}` in `text` through `lookup`, left to right.
///
/// Unset variables expand to nothing. Expanded values are copied as-is and
/// never scanned again, so a value containing `{env:...}` stays literal. An
/// unterminated reference ends the scan and is kept verbatim.
fn expand_env<F>(text: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find(ENV_OPEN) {
        let name_and_tail = &rest[open + ENV_OPEN.len()..];
        let Some(close) = name_and_tail.find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let var = &name_and_tail[..close];
        match lookup(var) {
            Some(value) => out.push_str(&value),
            None => tracing::debug!(var, "config references unset environment variable"),
        }
        rest = &name_and_tail[close + 1..];
    }
    out.push_str(rest);
    out
}

impl Config {
    /// Expands `{env:VAR}` in the default provider and every provider's
    /// key and endpoint.
    pub(super) fn resolve_substitutions(&mut self) {
        let env = |var: &str| std::env::var(var).ok();
        if let Some(ref mut provider) = self.default_provider {
            *provider = expand_env(provider.as_str(), env);
        }
        for settings in self.providers.values_mut() {
            for field in [&mut settings.api_key, &mut settings.base_url].into_iter().flatten() {
                *field = expand_env(field.as_str(), env);
            }
        }
    }

    /// API key configured for `provider`, ignoring empty values.
    pub fn configured_api_key(&self, provider: &str) -> Option<&str> {
        self.providers
            .get(provider)
            .and_then(|p| p.api_key.as_deref())
            .filter(|k| !k.is_empty())
    }

    /// Base URL configured for `provider`, ignoring empty values.
    pub fn configured_base_url(&self, provider: &str) -> Option<&str> {
        self.providers
            .get(provider)
            .and_then(|p| p.base_url.as_deref())
            .filter(|u| !u.is_empty())
    }

    /// The active catalog: the configured file, else the variant's built-in table.
    pub fn load_catalog(&self) -> Result<ProviderCatalog, CatalogError> {
        match self.catalog {
            Some(ref path) => ProviderCatalog::from_path(path),
            None => self.variant().builtin_catalog(),
        }
    }

    /// Fallback provider: the configured one, else the catalog's own.
    pub fn default_provider_for<'a>(&'a self, catalog: &'a ProviderCatalog) -> &'a str {
        self.default_provider
            .as_deref()
            .unwrap_or_else(|| catalog.default_provider())
    }

    /// Binding for the configured variant against `catalog`.
    pub fn binding_spec(&self, catalog: &ProviderCatalog) -> BindingSpec {
        BindingSpec::for_variant(self.variant(), self.default_provider_for(catalog))
    }
}
