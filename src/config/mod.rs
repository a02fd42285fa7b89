//! Configuration types and path resolution for modelsel.
//!
//! modelsel stores its settings as TOML at the platform's XDG config path
//! (e.g. `~/.config/modelsel/config.toml` on Linux). A `modelsel.toml` in the
//! project tree overrides it.

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Config;
#[allow(unused_imports)]
pub use types::{LoaderConfig, ProviderSettings};

use anyhow::Result;

impl Config {
    /// Reads the global file (writing a commented default on first run),
    /// layers the project file over it and expands `{env:VAR}` references.
    pub fn load() -> Result<Self> {
        let mut config = match Self::load_project()? {
            Some(project) => Self::merge(Self::load_global()?, project),
            None => Self::load_global()?,
        };
        config.resolve_substitutions();
        tracing::debug!(
            variant = config.variant().node_type(),
            providers = config.providers.len(),
            custom_catalog = config.catalog.is_some(),
            "config loaded"
        );
        Ok(config)
    }
}
