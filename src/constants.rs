//! Centralized constants for modelsel.
//!
//! Widget names, placeholder strings, and loader defaults live here so they
//! can be changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "modelsel";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Per-project configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = "modelsel.toml";

// --- Provider defaults ---

/// Provider used when the selected one is not in the catalog.
pub const DEFAULT_PROVIDER: &str = "DeepSeek (Official)";

// --- Widget names ---

/// Name of the provider selector on every bound node.
pub const PROVIDER_WIDGET: &str = "provider";

/// Single model selector (model-selector nodes).
pub const MODEL_WIDGET: &str = "model";

/// Text-to-text model selector (API loader nodes).
pub const T2T_MODEL_WIDGET: &str = "t2t_model";

/// Text+image-to-text model selector (API loader nodes).
pub const TI2T_MODEL_WIDGET: &str = "ti2t_model";

// --- Catalog fields ---

/// Catalog field holding text-to-text models.
pub const T2T_FIELD: &str = "t2t_models";

/// Catalog field holding vision models.
pub const TI2T_FIELD: &str = "ti2t_models";

// --- Placeholders ---

/// Shown in the single model selector when a provider has no models.
pub const NO_MODELS_PLACEHOLDER: &str = "No models available";

/// Shown in the T2T selector when a provider has no text models.
pub const NO_T2T_MODELS_PLACEHOLDER: &str = "No T2T models available";

/// Shown in the TI2T selector when a provider has no vision models.
pub const NO_TI2T_MODELS_PLACEHOLDER: &str = "No VLM models available";

// --- Node types ---

/// Node type that carries the provider + T2T/TI2T selectors.
pub const API_LOADER_NODE: &str = "LiveSearch_API_Loader";

/// Node type that carries the provider + single model selector.
pub const MODEL_SELECTOR_NODE: &str = "LiveSearch_Model_Selector";

/// Tag under which the binder registers its provider listener.
pub const BINDER_LISTENER_TAG: &str = "modelsel.provider-model-binder";

// --- Loader defaults ---

/// Default sampling temperature.
pub const TEMPERATURE_DEFAULT: f64 = 0.7;

/// Inclusive temperature bounds.
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);

/// Default completion token limit.
pub const MAX_TOKENS_DEFAULT: u32 = 2048;

/// Inclusive completion token limit bounds.
pub const MAX_TOKENS_RANGE: (u32, u32) = (1, 128_000);

/// Default request timeout in seconds.
pub const TIMEOUT_DEFAULT_SECS: u32 = 120;

/// Inclusive timeout bounds in seconds.
pub const TIMEOUT_RANGE_SECS: (u32, u32) = (10, 600);
