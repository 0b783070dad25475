//! Consumer `package.json` handling.
//!
//! The manifest is treated as an untyped JSON object. Only `scripts` is
//! touched; every other key keeps its value and position.

use crate::error::InstallError;
use crate::render::to_pretty_json;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Conventional manifest file name.
pub const MANIFEST_FILE: &str = "package.json";

/// A parsed project manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::FileAccess`] if the file cannot be read,
    /// [`InstallError::Parse`] if it is not JSON and
    /// [`InstallError::InvalidManifest`] if the root is not an object.
    pub fn load(path: &Path) -> Result<Self, InstallError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| InstallError::file_access(path, e))?;
        Self::parse(path, &content)
    }

    /// Parses manifest text; `path` is kept for error messages and saving.
    ///
    /// # Errors
    ///
    /// See [`Manifest::load`].
    pub fn parse(path: &Path, content: &str) -> Result<Self, InstallError> {
        let value: Value = serde_json::from_str(content).map_err(|e| InstallError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        match value {
            Value::Object(root) => Ok(Self {
                path: path.to_path_buf(),
                root,
            }),
            other => Err(InstallError::InvalidManifest {
                path: path.to_path_buf(),
                reason: format!("expected an object at the top level, found {}", kind(&other)),
            }),
        }
    }

    /// Path the manifest was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top-level object.
    #[must_use]
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Looks up a script command.
    #[must_use]
    pub fn script(&self, name: &str) -> Option<&str> {
        self.root.get("scripts")?.get(name)?.as_str()
    }

    /// Serializes the manifest with four-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Render`] if serialization fails.
    pub fn to_pretty_string(&self) -> Result<String, InstallError> {
        to_pretty_json(&self.root).map_err(InstallError::Render)
    }

    /// Writes the manifest back to its path.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::FileAccess`] if the write fails.
    pub fn save(&self) -> Result<(), InstallError> {
        let text = self.to_pretty_string()?;
        std::fs::write(&self.path, text).map_err(|e| InstallError::file_access(&self.path, e))
    }
}

/// Script entries to set in a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestPatch {
    scripts: Vec<(String, String)>,
}

impl ManifestPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a script entry, builder style.
    #[must_use]
    pub fn script(mut self, name: impl Into<String>, command: impl Into<String>) -> Self {
        self.scripts.push((name.into(), command.into()));
        self
    }

    /// Script entries in application order.
    #[must_use]
    pub fn scripts(&self) -> &[(String, String)] {
        &self.scripts
    }

    /// Applies the patch in memory.
    ///
    /// A missing or `null` `scripts` becomes an empty object first.
    /// Existing entries with the same name are overwritten in place.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::InvalidManifest`] if `scripts` holds
    /// something other than an object.
    pub fn apply(&self, manifest: &mut Manifest) -> Result<(), InstallError> {
        let slot = manifest
            .root
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        if slot.is_null() {
            *slot = Value::Object(Map::new());
        }
        let scripts = match slot {
            Value::Object(map) => map,
            other => {
                return Err(InstallError::InvalidManifest {
                    path: manifest.path.clone(),
                    reason: format!("`scripts` is {}, expected an object", kind(other)),
                })
            }
        };

        for (name, command) in &self.scripts {
            tracing::debug!("Setting scripts.{} = {:?}", name, command);
            scripts.insert(name.clone(), Value::String(command.clone()));
        }
        Ok(())
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
