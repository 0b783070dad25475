//! # esconf
//!
//! A shared ESLint + JSDoc configuration, published as immutable
//! documents.
//!
//! This is the facade crate: it re-exports the core types and the rule
//! catalog. Importing it never touches the filesystem; installing the
//! configuration into a project is done by the `esconf` binary, or by
//! calling [`install`] explicitly.
//!
//! ## Reading the configuration
//!
//! ```rust,ignore
//! use esconf::{configuration, Flavor};
//!
//! let doc = configuration(Flavor::Modern);
//! println!("{}", serde_json::to_string_pretty(doc)?);
//! ```
//!
//! ## Installing into a project
//!
//! ```rust,ignore
//! use esconf::{install, install_plan, Flavor, PackageManager};
//!
//! let plan = install_plan(Flavor::Legacy, "./my-app")?;
//! install(&plan, &PackageManager::npm())?;
//! ```

#![forbid(unsafe_code)]

use std::path::PathBuf;

// Re-export core types and the installer
pub use esconf_core::*;

/// Rule tables and presets.
pub mod rules {
    pub use esconf_rules::*;
}

pub use esconf_rules::{catalog, legacy, modern, Preset};

/// Returns the exported document for `flavor`.
#[must_use]
pub fn configuration(flavor: Flavor) -> &'static ConfigurationDocument {
    Preset::for_flavor(flavor).document()
}

/// Builds the install plan for putting the `flavor` document into
/// `project_dir`.
///
/// # Errors
///
/// Returns [`InstallError::Render`] if the document cannot be rendered.
pub fn install_plan(
    flavor: Flavor,
    project_dir: impl Into<PathBuf>,
) -> Result<InstallPlan, InstallError> {
    InstallPlan::for_document(configuration(flavor), project_dir)
}
