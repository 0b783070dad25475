//! # esconf-rules
//!
//! The rule catalog distributed by esconf.
//!
//! One rule table feeds both document shapes, so a rule enabled for
//! `.eslint.js` is enabled with the same setting in `eslint.config.mjs`.
//!
//! ## Rule groups
//!
//! | Group | Namespace | Rules |
//! |-------|-----------|-------|
//! | Style | (core) | `indent`, `quotes`, `max-len`, `no-console`, ... |
//! | Documentation | `jsdoc/` | 41 checks from `eslint-plugin-jsdoc` |
//!
//! ## Usage
//!
//! ```ignore
//! use esconf_rules::Preset;
//!
//! let doc = Preset::Modern.document();
//! assert!(doc.validate().is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod jsdoc;
mod presets;
mod style;

pub use jsdoc::{jsdoc_rules, jsdoc_settings, PACKAGE as JSDOC_PACKAGE, PLUGIN as JSDOC_PLUGIN};
pub use presets::{catalog, legacy, modern, Preset};
pub use style::style_rules;

/// Re-export core types for convenience.
pub use esconf_core::{ConfigurationDocument, Flavor, RuleCatalog, RuleSetting, Severity};
