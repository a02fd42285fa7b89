//! File loading and merging for modelsel configuration.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::types::{Config, LoaderConfig};

/// Written on first run so users have something to edit.
const DEFAULT_CONFIG: &str = r#"# modelsel configuration

# Node variant: "api-loader" (t2t/ti2t selectors) or "model-selector" (single selector)
variant = "api-loader"

# Provider used when a node names one the catalog does not know.
# default_provider = "DeepSeek (Official)"

# Replace the built-in catalog.
# catalog = "/path/to/catalog.toml"

[loader]
temperature = 0.7
max_tokens = 2048
timeout = 120

[providers."OpenAI"]
api_key = "{env:OPENAI_API_KEY}"

[providers."DeepSeek (Official)"]
api_key = "{env:DEEPSEEK_API_KEY}"
"#;

impl Config {
    /// Loads the global config from `~/.config/modelsel/config.toml`.
    ///
    /// If no config file exists, writes the commented default and returns it.
    pub(super) fn load_global() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write default config to {:?}", path))?;
            tracing::info!(path = %path.display(), "wrote default config");
            return Self::parse(DEFAULT_CONFIG).context("Failed to parse default config");
        }
        Self::read(&path)
    }

    /// Look for modelsel.toml in current dir, then walk up to git root.
    pub(super) fn load_project() -> Result<Option<Config>> {
        let mut dir = std::env::current_dir()?;
        loop {
            let candidate = dir.join(crate::constants::PROJECT_CONFIG_FILENAME);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "found project config");
                return Self::read(&candidate).map(Some);
            }
            // Stop at git root or filesystem root
            if dir.join(".git").exists() || !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Merge project config over global config.
    /// Project values win when present; provider tables merge per provider.
    pub(super) fn merge(global: Config, project: Config) -> Config {
        let mut providers = global.providers;
        for (name, settings) in project.providers {
            let entry = providers.entry(name).or_default();
            if settings.api_key.is_some() {
                entry.api_key = settings.api_key;
            }
            if settings.base_url.is_some() {
                entry.base_url = settings.base_url;
            }
        }

        Config {
            variant: project.variant.or(global.variant),
            default_provider: project.default_provider.or(global.default_provider),
            catalog: project.catalog.or(global.catalog),
            providers,
            loader: LoaderConfig {
                temperature: project.loader.temperature.or(global.loader.temperature),
                max_tokens: project.loader.max_tokens.or(global.loader.max_tokens),
                timeout: project.loader.timeout.or(global.loader.timeout),
            },
        }
    }
}
