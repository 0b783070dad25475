//! Configuration types for esconf.

use crate::document::Flavor;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, read from `esconf.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Document flavor to install (default: legacy).
    #[serde(default)]
    pub flavor: Option<Flavor>,

    /// Installer configuration.
    #[serde(default)]
    pub installer: InstallerConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// The flavor to install, falling back to legacy.
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        self.flavor.unwrap_or_default()
    }
}

/// Installer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerConfig {
    /// Package manager program (default: `npm`).
    #[serde(default = "default_package_manager")]
    pub package_manager: String,

    /// Skip installing dev dependencies.
    #[serde(default)]
    pub skip_dependencies: bool,

    /// Manifest path relative to the project directory.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            package_manager: default_package_manager(),
            skip_dependencies: false,
            manifest: default_manifest(),
        }
    }
}

fn default_package_manager() -> String {
    "npm".to_string()
}

fn default_manifest() -> PathBuf {
    PathBuf::from(crate::manifest::MANIFEST_FILE)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
