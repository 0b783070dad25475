//! Presets: the shared catalog assembled into each document shape.

use crate::jsdoc::{self, jsdoc_rules, jsdoc_settings};
use crate::style::style_rules;
use esconf_core::{
    ConfigurationDocument, FlatConfig, FlatFragment, Flavor, LanguageOptions, LegacyConfig,
    ParserOptions, PluginRef, RuleCatalog, ScopedFragment, SharedConfig,
};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Globs skipped by the legacy document.
const LEGACY_IGNORE_PATTERNS: &[&str] = &["test/*", "*/configs/jsdoc-template/*", "docs/jsdoc/*"];

/// Globs linted by the modern document.
const MODERN_FILES: &[&str] = &["**/*.js"];

/// Globs skipped by the modern document.
const MODERN_IGNORES: &[&str] = &["**/node_modules", "**/bin", "**/.*", ".*", "node_modules"];

/// Preset documents shipped by esconf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Single-object document for `.eslint.js`.
    Legacy,
    /// Flat document for `eslint.config.mjs`.
    Modern,
}

impl Preset {
    /// Returns the preset producing `flavor`.
    #[must_use]
    pub fn for_flavor(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Legacy => Self::Legacy,
            Flavor::Modern => Self::Modern,
        }
    }

    /// Returns the document for this preset.
    ///
    /// Built on first use and shared for the rest of the process.
    #[must_use]
    pub fn document(self) -> &'static ConfigurationDocument {
        match self {
            Self::Legacy => legacy(),
            Self::Modern => modern(),
        }
    }
}

/// The shared rule table: style rules followed by jsdoc rules.
#[must_use]
pub fn catalog() -> &'static RuleCatalog {
    static CATALOG: OnceLock<RuleCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let catalog = style_rules().extend(&jsdoc_rules());
        tracing::debug!("Built rule catalog with {} rules", catalog.len());
        catalog
    })
}

/// The legacy document.
#[must_use]
pub fn legacy() -> &'static ConfigurationDocument {
    static LEGACY: OnceLock<ConfigurationDocument> = OnceLock::new();
    LEGACY.get_or_init(|| ConfigurationDocument::Legacy(legacy_config()))
}

/// The modern document.
#[must_use]
pub fn modern() -> &'static ConfigurationDocument {
    static MODERN: OnceLock<ConfigurationDocument> = OnceLock::new();
    MODERN.get_or_init(|| ConfigurationDocument::Flat(modern_config()))
}

fn legacy_config() -> LegacyConfig {
    LegacyConfig {
        parser_options: ParserOptions { ecma_version: 2020 },
        env: BTreeMap::from([("es6".to_string(), true), ("node".to_string(), true)]),
        extends: vec!["eslint:recommended".to_string()],
        plugins: vec![jsdoc::PLUGIN.to_string()],
        rules: catalog().clone(),
        settings: Some(jsdoc_settings()),
        ignore_patterns: strings(LEGACY_IGNORE_PATTERNS),
    }
}

fn modern_config() -> FlatConfig {
    FlatConfig {
        fragments: vec![
            FlatFragment::Shared(SharedConfig {
                binding: "js".to_string(),
                package: "@eslint/js".to_string(),
                expression: "js.configs.recommended".to_string(),
            }),
            FlatFragment::Scoped(ScopedFragment {
                files: strings(MODERN_FILES),
                ignores: strings(MODERN_IGNORES),
                language_options: Some(LanguageOptions {
                    ecma_version: 2022,
                    source_type: None,
                    globals: vec!["browser".to_string(), "node".to_string()],
                }),
                plugins: vec![PluginRef::new(jsdoc::PLUGIN, jsdoc::PACKAGE)],
                rules: catalog().clone(),
                settings: Some(jsdoc_settings()),
            }),
        ],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
