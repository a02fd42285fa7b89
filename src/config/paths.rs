//! XDG path resolution for modelsel configuration.

use anyhow::Result;
use std::path::PathBuf;

use super::types::Config;

impl Config {
    /// Returns the platform-specific configuration directory for modelsel.
    ///
    /// Returns `~/.config/modelsel/` on Linux (`XDG_CONFIG_HOME/modelsel`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform's config directory cannot be determined.
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join(crate::constants::APP_NAME);
        Ok(dir)
    }

    /// Returns the full path to the modelsel configuration file.
    ///
    /// Returns `~/.config/modelsel/config.toml` on Linux.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(crate::constants::CONFIG_FILENAME))
    }
}
