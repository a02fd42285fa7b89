//! API loader: turns a node's provider/model selection into a request config.
//!
//! Values the caller leaves unset fall back to the config file's `[loader]`
//! table and then to built-in defaults. Numeric values are range-checked.

use serde::Serialize;

use crate::catalog::ProviderCatalog;
use crate::config::Config;
use crate::constants::{
    MAX_TOKENS_DEFAULT, MAX_TOKENS_RANGE, TEMPERATURE_DEFAULT, TEMPERATURE_RANGE,
    TIMEOUT_DEFAULT_SECS, TIMEOUT_RANGE_SECS,
};
use crate::error::LoaderError;

/// What the loader node was given.
#[derive(Debug, Clone, Default)]
pub struct LoaderInput {
    pub provider: String,
    pub t2t_model: String,
    pub ti2t_model: String,
    /// Overrides environment and config file keys when non-empty.
    pub api_key: Option<String>,
    /// Overrides configured and catalog endpoints when non-empty.
    pub base_url: Option<String>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    /// Seconds.
    pub timeout: Option<u32>,
}

/// Resolved configuration handed to downstream nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelConfig {
    pub provider: String,
    pub t2t_model: String,
    pub ti2t_model: String,
    pub api_key: String,
    pub base_url: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout: u32,
}

impl ModelConfig {
    /// Copy with the API key reduced to its last four characters.
    ///
    /// Keys of four characters or fewer are hidden completely.
    pub fn masked(&self) -> Self {
        let api_key = if self.api_key.is_empty() {
            String::new()
        } else if self.api_key.chars().count() <= 4 {
            "****".to_string()
        } else {
            let tail: String = self
                .api_key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{tail}")
        };
        Self {
            api_key,
            ..self.clone()
        }
    }
}

/// Resolves `input` against the catalog, config, and process environment.
pub fn load_api(
    input: &LoaderInput,
    catalog: &ProviderCatalog,
    config: &Config,
) -> Result<ModelConfig, LoaderError> {
    load_api_with_env(input, catalog, config, |var| std::env::var(var).ok())
}

/// Like [`load_api`], reading environment variables through `env`.
///
/// Key priority: explicit input, then the provider's environment variable,
/// then the config file. Base URL priority: explicit input, then the config
/// file, then the catalog.
pub fn load_api_with_env<E>(
    input: &LoaderInput,
    catalog: &ProviderCatalog,
    config: &Config,
    env: E,
) -> Result<ModelConfig, LoaderError>
where
    E: Fn(&str) -> Option<String>,
{
    let entry = catalog.get(&input.provider);
    if entry.is_none() {
        tracing::warn!(provider = %input.provider, "provider not in catalog, no default endpoint");
    }

    let api_key = non_empty(input.api_key.as_deref())
        .map(str::to_string)
        .or_else(|| {
            entry
                .and_then(|e| e.api_key_var())
                .and_then(|var| env(&var))
                .filter(|k| !k.trim().is_empty())
        })
        .or_else(|| config.configured_api_key(&input.provider).map(str::to_string))
        .unwrap_or_default();

    let base_url = non_empty(input.base_url.as_deref())
        .or_else(|| config.configured_base_url(&input.provider))
        .or_else(|| entry.and_then(|e| e.base_url.as_deref()))
        .unwrap_or_default()
        .to_string();

    let temperature = input
        .temperature
        .or(config.loader.temperature)
        .unwrap_or(TEMPERATURE_DEFAULT);
    check_range("temperature", temperature, TEMPERATURE_RANGE)?;

    let max_tokens = input
        .max_tokens
        .or(config.loader.max_tokens)
        .unwrap_or(MAX_TOKENS_DEFAULT);
    check_range("max_tokens", max_tokens, MAX_TOKENS_RANGE)?;

    let timeout = input
        .timeout
        .or(config.loader.timeout)
        .unwrap_or(TIMEOUT_DEFAULT_SECS);
    check_range("timeout", timeout, TIMEOUT_RANGE_SECS)?;

    let model_config = ModelConfig {
        provider: input.provider.clone(),
        t2t_model: input.t2t_model.clone(),
        ti2t_model: input.ti2t_model.clone(),
        api_key,
        base_url,
        temperature,
        max_tokens,
        timeout,
    };
    tracing::info!(
        provider = %model_config.provider,
        t2t = %model_config.t2t_model,
        ti2t = %model_config.ti2t_model,
        "api loader configured"
    );
    Ok(model_config)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Rejects values outside `min..=max`, including values that do not compare
/// at all (NaN).
fn check_range<T>(name: &'static str, value: T, (min, max): (T, T)) -> Result<(), LoaderError>
where
    T: PartialOrd + ToString,
{
    let range = min..=max;
    if !range.contains(&value) {
        return Err(LoaderError::OutOfRange {
            name,
            value: value.to_string(),
            min: range.start().to_string(),
            max: range.end().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProviderEntry, Variant};
    use serde_json::json;

    fn catalog() -> ProviderCatalog {
        let mut entry = ProviderEntry::with_roles("Acme (Cloud)", [("t2t_models", vec!["a1"])]);
        entry.base_url = Some("https://acme.example/v1".into());
        let mut custom = ProviderEntry::with_roles("Other", [("t2t_models", vec!["o1"])]);
        custom.api_key_env = Some("OTHER_KEY".into());
        ProviderCatalog::new("Acme (Cloud)", vec![entry, custom]).unwrap()
    }

    fn input(provider: &str) -> LoaderInput {
        LoaderInput {
            provider: provider.into(),
            t2t_model: "a1".into(),
            ti2t_model: "No VLM models available".into(),
            ..LoaderInput::default()
        }
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let cfg = load_api_with_env(&input("Acme (Cloud)"), &catalog(), &Config::default(), no_env).unwrap();
        assert_eq!(
            serde_json::to_value(&cfg).unwrap(),
            json!({
                "provider": "Acme (Cloud)",
                "t2t_model": "a1",
                "ti2t_model": "No VLM models available",
                "api_key": "",
                "base_url": "https://acme.example/v1",
                "temperature": 0.7,
                "max_tokens": 2048,
                "timeout": 120
            })
        );
    }

    #[test]
    fn test_api_key_priority() {
        let mut config = Config::parse("[providers.\"Acme (Cloud)\"]\napi_key = \"from-config\"\n").unwrap();
        let env = |var: &str| (var == "ACME_API_KEY").then(|| "from-env".to_string());

        let mut explicit = input("Acme (Cloud)");
        explicit.api_key = Some("  from-input  ".into());
        assert_eq!(load_api_with_env(&explicit, &catalog(), &config, env).unwrap().api_key, "from-input");

        let mut blank = input("Acme (Cloud)");
        blank.api_key = Some("   ".into());
        assert_eq!(load_api_with_env(&blank, &catalog(), &config, env).unwrap().api_key, "from-env");

        assert_eq!(load_api_with_env(&blank, &catalog(), &config, no_env).unwrap().api_key, "from-config");

        config.providers.clear();
        assert_eq!(load_api_with_env(&blank, &catalog(), &config, no_env).unwrap().api_key, "");
    }

    #[test]
    fn test_api_key_env_override() {
        let env = |var: &str| (var == "OTHER_KEY").then(|| "other".to_string());
        let cfg = load_api_with_env(&input("Other"), &catalog(), &Config::default(), env).unwrap();
        assert_eq!(cfg.api_key, "other");
        assert_eq!(cfg.base_url, "");
    }

    #[test]
    fn test_base_url_priority() {
        let config = Config::parse("[providers.\"Acme (Cloud)\"]\nbase_url = \"https://proxy.example\"\n").unwrap();
        let mut req = input("Acme (Cloud)");
        assert_eq!(
            load_api_with_env(&req, &catalog(), &config, no_env).unwrap().base_url,
            "https://proxy.example"
        );
        req.base_url = Some("https://direct.example".into());
        assert_eq!(
            load_api_with_env(&req, &catalog(), &config, no_env).unwrap().base_url,
            "https://direct.example"
        );
    }

    #[test]
    fn test_unknown_provider_still_loads() {
        let cfg = load_api_with_env(&input("Nowhere"), &catalog(), &Config::default(), no_env).unwrap();
        assert_eq!(cfg.provider, "Nowhere");
        assert_eq!(cfg.base_url, "");
    }

    #[test]
    fn test_config_loader_defaults_apply() {
        let config = Config::parse("[loader]\ntemperature = 1.5\nmax_tokens = 64\ntimeout = 30\n").unwrap();
        let cfg = load_api_with_env(&input("Acme (Cloud)"), &catalog(), &config, no_env).unwrap();
        assert_eq!((cfg.temperature, cfg.max_tokens, cfg.timeout), (1.5, 64, 30));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut req = input("Acme (Cloud)");
        req.temperature = Some(2.5);
        let err = load_api_with_env(&req, &catalog(), &Config::default(), no_env).unwrap_err();
        assert_eq!(
            err,
            LoaderError::OutOfRange {
                name: "temperature",
                value: "2.5".into(),
                min: "0".into(),
                max: "2".into(),
            }
        );

        let mut req = input("Acme (Cloud)");
        req.timeout = Some(5);
        assert!(matches!(
            load_api_with_env(&req, &catalog(), &Config::default(), no_env),
            Err(LoaderError::OutOfRange { name: "timeout", .. })
        ));

        let mut req = input("Acme (Cloud)");
        req.max_tokens = Some(0);
        assert!(load_api_with_env(&req, &catalog(), &Config::default(), no_env).is_err());
    }

    #[test]
    fn test_nan_temperature_rejected() {
        let mut req = input("Acme (Cloud)");
        req.temperature = Some(f64::NAN);
        assert!(matches!(
            load_api_with_env(&req, &catalog(), &Config::default(), no_env),
            Err(LoaderError::OutOfRange { name: "temperature", .. })
        ));

        let config = Config::parse("[loader]\ntemperature = nan\n").unwrap();
        assert!(load_api_with_env(&input("Acme (Cloud)"), &catalog(), &config, no_env).is_err());
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut req = input("Acme (Cloud)");
        req.temperature = Some(0.0);
        req.max_tokens = Some(128_000);
        req.timeout = Some(10);
        let cfg = load_api_with_env(&req, &catalog(), &Config::default(), no_env).unwrap();
        assert_eq!((cfg.temperature, cfg.max_tokens, cfg.timeout), (0.0, 128_000, 10));
    }

    #[test]
    fn test_masked_key() {
        let mut req = input("Acme (Cloud)");
        req.api_key = Some("sk-1234567890".into());
        let cfg = load_api_with_env(&req, &catalog(), &Config::default(), no_env).unwrap();
        assert_eq!(cfg.masked().api_key, "****7890");
        assert_eq!(cfg.masked().provider, cfg.provider);

        let empty = load_api_with_env(&input("Acme (Cloud)"), &catalog(), &Config::default(), no_env).unwrap();
        assert_eq!(empty.masked().api_key, "");
    }

    #[test]
    fn test_short_key_fully_masked() {
        for key in ["k", "abcd", "密钥"] {
            let mut req = input("Acme (Cloud)");
            req.api_key = Some(key.into());
            let cfg = load_api_with_env(&req, &catalog(), &Config::default(), no_env).unwrap();
            assert_eq!(cfg.masked().api_key, "****");
        }

        let mut req = input("Acme (Cloud)");
        req.api_key = Some("abcde".into());
        let cfg = load_api_with_env(&req, &catalog(), &Config::default(), no_env).unwrap();
        assert_eq!(cfg.masked().api_key, "****bcde");
    }

    #[test]
    fn test_builtin_catalog_endpoint() {
        let catalog = Variant::ApiLoader.builtin_catalog().unwrap();
        let cfg = load_api_with_env(&input("Grok"), &catalog, &Config::default(), no_env).unwrap();
        assert_eq!(cfg.base_url, "https://api.x.ai/v1");
    }
}
