//! Locates and loads `esconf.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. the `--config` path, taken as given
//! 2. `esconf.toml`, then `.esconf.toml`, in the project directory
//! 3. `config.toml` in the global directory (`$ESCONF_CONFIG_DIR` or `~/.esconf/`)
//! 4. built-in defaults

use anyhow::{Context, Result};
use esconf::Config;
use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`.
    Explicit(PathBuf),
    /// Found next to the project manifest.
    Project(PathBuf),
    /// Found in the global directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// File backing this source, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads the configuration, or returns defaults for [`ConfigSource::Default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No esconf.toml found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

const PROJECT_FILES: [&str; 2] = ["esconf.toml", ".esconf.toml"];

const GLOBAL_FILE: &str = "config.toml";

/// Resolves the configuration source for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    lookup(project_dir, explicit, global_config_dir().as_deref())
}

fn lookup(project_dir: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = PROJECT_FILES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file())
    {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    match global_dir.map(|d| d.join(GLOBAL_FILE)) {
        Some(p) if p.is_file() => ConfigSource::Global(p),
        _ => ConfigSource::Default,
    }
}

/// Global configuration directory: `$ESCONF_CONFIG_DIR`, else `~/.esconf`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("ESCONF_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".esconf")))
}
