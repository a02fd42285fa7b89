//! Pure resolution: provider value + catalog → dropdown contents.

use super::spec::{BindingSpec, RoleBinding};
use crate::catalog::{ProviderCatalog, ProviderEntry};

/// Dropdown contents for one role after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleOptions {
    /// Values to offer: the provider's models, or just the placeholder.
    pub values: Vec<String>,
    /// Value to select.
    pub selected: String,
}

/// Finds the entry for `provider`, falling back to `default_provider`.
///
/// `None` when neither is a catalog key; callers treat that as every role
/// being empty.
pub fn resolve_entry<'a>(
    catalog: &'a ProviderCatalog,
    provider: &str,
    default_provider: &str,
) -> Option<&'a ProviderEntry> {
    catalog.get(provider).or_else(|| {
        tracing::debug!(provider, default_provider, "unknown provider, using default");
        catalog.get(default_provider)
    })
}

/// Models `role` gets from `entry` (empty when there is no entry).
pub fn models_for<'a>(entry: Option<&'a ProviderEntry>, role: &RoleBinding) -> &'a [String] {
    match entry {
        Some(e) => e.models.models_for(role.field.as_deref()),
        None => &[],
    }
}

/// Builds the dropdown for one role.
///
/// Keeps `current` when it is one of `models`; otherwise picks the first
/// model, or the placeholder when there are none.
pub fn role_options(models: &[String], placeholder: &str, current: &str) -> RoleOptions {
    if models.is_empty() {
        return RoleOptions {
            values: vec![placeholder.to_string()],
            selected: placeholder.to_string(),
        };
    }
    let selected = if models.iter().any(|m| m == current) {
        current.to_string()
    } else {
        models[0].clone()
    };
    RoleOptions {
        values: models.to_vec(),
        selected,
    }
}

/// Resolves every role of `spec` for `provider`.
///
/// `current` yields each role widget's present value (by widget name).
pub fn resolve<'s, F>(
    catalog: &ProviderCatalog,
    spec: &'s BindingSpec,
    provider: &str,
    mut current: F,
) -> Vec<(&'s RoleBinding, RoleOptions)>
where
    F: FnMut(&str) -> Option<String>,
{
    let entry = resolve_entry(catalog, provider, &spec.default_provider);
    spec.roles
        .iter()
        .map(|role| {
            let models = models_for(entry, role);
            let value = current(&role.widget).unwrap_or_default();
            (role, role_options(models, &role.placeholder, &value))
        })
        .collect()
}
