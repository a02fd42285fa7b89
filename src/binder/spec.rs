//! Which widgets a binder links, and how.

use crate::catalog::Variant;
use crate::constants::{
    MODEL_WIDGET, NO_MODELS_PLACEHOLDER, NO_T2T_MODELS_PLACEHOLDER, NO_TI2T_MODELS_PLACEHOLDER,
    PROVIDER_WIDGET, T2T_FIELD, T2T_MODEL_WIDGET, TI2T_FIELD, TI2T_MODEL_WIDGET,
};

/// One dependent model selector and where its choices come from.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleBinding {
    /// Widget name on the node, e.g. `"t2t_model"`.
    pub widget: String,
    /// Catalog field for this role; `None` reads a flat model list.
    pub field: Option<String>,
    /// Shown and selected when the provider offers nothing for this role.
    pub placeholder: String,
}

impl RoleBinding {
    pub fn new(widget: &str, field: Option<&str>, placeholder: &str) -> Self {
        Self {
            widget: widget.to_string(),
            field: field.map(str::to_string),
            placeholder: placeholder.to_string(),
        }
    }
}

/// Provider selector, its dependent selectors, and the fallback provider.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingSpec {
    pub provider_widget: String,
    pub roles: Vec<RoleBinding>,
    /// Used when the selected provider is not a catalog key.
    pub default_provider: String,
}

impl BindingSpec {
    /// `provider` → `model`, flat lists.
    pub fn single_model(default_provider: &str) -> Self {
        Self {
            provider_widget: PROVIDER_WIDGET.to_string(),
            roles: vec![RoleBinding::new(MODEL_WIDGET, None, NO_MODELS_PLACEHOLDER)],
            default_provider: default_provider.to_string(),
        }
    }

    /// `provider` → `t2t_model` + `ti2t_model`, role-keyed lists.
    pub fn api_loader(default_provider: &str) -> Self {
        Self {
            provider_widget: PROVIDER_WIDGET.to_string(),
            roles: vec![
                RoleBinding::new(T2T_MODEL_WIDGET, Some(T2T_FIELD), NO_T2T_MODELS_PLACEHOLDER),
                RoleBinding::new(TI2T_MODEL_WIDGET, Some(TI2T_FIELD), NO_TI2T_MODELS_PLACEHOLDER),
            ],
            default_provider: default_provider.to_string(),
        }
    }

    pub fn for_variant(variant: Variant, default_provider: &str) -> Self {
        match variant {
            Variant::ApiLoader => Self::api_loader(default_provider),
            Variant::ModelSelector => Self::single_model(default_provider),
        }
    }

    /// Widget names the binder needs on a node: the provider first, then each role.
    pub fn required_widgets(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.provider_widget.as_str())
            .chain(self.roles.iter().map(|r| r.widget.as_str()))
    }
}
