//! # esconf-core
//!
//! Core types for publishing a shared ESLint configuration.
//!
//! This crate provides:
//!
//! - [`RuleCatalog`] and [`RuleSetting`] for declaring rules and severities
//! - [`ConfigurationDocument`] in the legacy and flat shapes ESLint reads
//! - [`render_module`] to turn a document into a bootstrap module
//! - [`Manifest`] and [`ManifestPatch`] for editing `package.json`
//! - [`install`] which runs the installer pipeline against a project
//!
//! Nothing here touches the filesystem or spawns processes unless
//! [`install`] (or [`Manifest::load`]/[`Manifest::save`]) is called.
//!
//! ## Example
//!
//! ```ignore
//! use esconf_core::{install, InstallPlan, PackageManager};
//!
//! let plan = InstallPlan::for_document(&document, ".")?;
//! let report = install(&plan, &PackageManager::npm())?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod document;
mod error;
mod install;
mod manifest;
mod render;
mod types;

pub use catalog::{compare_rules, CatalogIssue, RuleCatalog, RuleMismatch};
pub use config::{Config, ConfigError, InstallerConfig};
pub use document::{
    compare_documents, ConfigurationDocument, DocumentIssue, FlatConfig, FlatFragment, Flavor,
    LanguageOptions, LegacyConfig, ParserOptions, PluginRef, ScopedFragment, SharedConfig,
};
pub use error::InstallError;
pub use install::{install, DependencyInstaller, InstallPlan, InstallReport, PackageManager, Step};
pub use manifest::{Manifest, ManifestPatch, MANIFEST_FILE};
pub use render::{render_module, to_pretty_json, INDENT};
pub use types::{RuleSetting, Severity};
