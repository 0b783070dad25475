//! Configuration documents in the two shapes ESLint accepts.
//!
//! - [`LegacyConfig`]: the single `.eslintrc`-style object with
//!   `extends`, `plugins`, `rules` and `ignorePatterns`.
//! - [`FlatConfig`]: the ordered fragment array read from
//!   `eslint.config.mjs`. Later fragments override earlier ones; the
//!   merge itself belongs to ESLint, [`FlatConfig::effective_rules`] only
//!   derives the resulting rule view.

use crate::catalog::{compare_rules, CatalogIssue, RuleCatalog, RuleMismatch};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which document shape a preset produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// Single-object configuration (`.eslint.js`).
    #[default]
    Legacy,
    /// Flat fragment-array configuration (`eslint.config.mjs`).
    #[serde(alias = "flat")]
    Modern,
}

impl Flavor {
    /// All flavors, legacy first.
    pub const ALL: [Flavor; 2] = [Flavor::Legacy, Flavor::Modern];

    /// Name of the bootstrap file written into consumer projects.
    #[must_use]
    pub fn config_file_name(self) -> &'static str {
        match self {
            Self::Legacy => ".eslint.js",
            Self::Modern => "eslint.config.mjs",
        }
    }

    /// Packages installed as development dependencies.
    #[must_use]
    pub fn dev_dependencies(self) -> &'static [&'static str] {
        match self {
            Self::Legacy => &["eslint", "jsdoc", "eslint-plugin-jsdoc@latest"],
            Self::Modern => &["eslint", "@eslint/js", "globals", "eslint-plugin-jsdoc@latest"],
        }
    }

    /// Scripts registered in the consumer manifest, as `(name, command)`.
    #[must_use]
    pub fn scripts(self) -> Vec<(&'static str, String)> {
        let lint = format!("eslint -c {} --fix .", self.config_file_name());
        match self {
            Self::Legacy => vec![
                ("lint", lint),
                ("jsdoc", "jsdoc -P package.json -d js_docs . ".to_string()),
            ],
            Self::Modern => vec![("lint", lint)],
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Legacy => write!(f, "legacy"),
            Self::Modern => write!(f, "modern"),
        }
    }
}

impl std::str::FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(Self::Legacy),
            "modern" | "flat" => Ok(Self::Modern),
            other => Err(format!("unknown flavor `{other}` (expected legacy or modern)")),
        }
    }
}

/// `parserOptions` of a legacy document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParserOptions {
    /// ECMAScript version to parse.
    pub ecma_version: u16,
}

/// Single-object configuration document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyConfig {
    /// Parser options.
    pub parser_options: ParserOptions,
    /// Enabled environments.
    pub env: BTreeMap<String, bool>,
    /// Named shareable configs, applied in order.
    pub extends: Vec<String>,
    /// Plugin names.
    pub plugins: Vec<String>,
    /// Rule catalog.
    pub rules: RuleCatalog,
    /// Shared plugin settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    /// Globs excluded from linting.
    pub ignore_patterns: Vec<String>,
}

/// A shared configuration referenced by expression, such as
/// `js.configs.recommended` from `@eslint/js`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedConfig {
    /// Local binding name (`js`).
    pub binding: String,
    /// Package the binding is imported from (`@eslint/js`).
    pub package: String,
    /// Expression evaluated against the binding (`js.configs.recommended`).
    pub expression: String,
}

impl Serialize for SharedConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.expression)
    }
}

/// A plugin loaded by a flat fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRef {
    /// Namespace used in rule identifiers (`jsdoc`).
    pub name: String,
    /// npm package providing the plugin (`eslint-plugin-jsdoc`).
    pub package: String,
}

impl PluginRef {
    /// Creates a plugin reference.
    #[must_use]
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
        }
    }

    /// Identifier the package is imported under in the rendered module.
    #[must_use]
    pub fn binding(&self) -> String {
        js_identifier(&self.name)
    }
}

/// `languageOptions` of a scoped fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOptions {
    /// ECMAScript version to parse.
    pub ecma_version: u16,
    /// Module system, left to ESLint's default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Named global sets from the `globals` package (`browser`, `node`).
    pub globals: Vec<String>,
}

/// A fragment scoped by `files`/`ignores` globs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedFragment {
    /// Globs the fragment applies to.
    pub files: Vec<String>,
    /// Globs excluded from the fragment.
    pub ignores: Vec<String>,
    /// Language options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_options: Option<LanguageOptions>,
    /// Plugins loaded by the fragment.
    #[serde(serialize_with = "serialize_plugins")]
    pub plugins: Vec<PluginRef>,
    /// Rules set by the fragment.
    pub rules: RuleCatalog,
    /// Shared plugin settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

fn serialize_plugins<S: Serializer>(
    plugins: &[PluginRef],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(plugins.len()))?;
    for p in plugins {
        map.serialize_entry(&p.name, &p.package)?;
    }
    map.end()
}

/// One element of a flat configuration array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatFragment {
    /// A shared config included verbatim.
    Shared(SharedConfig),
    /// A fragment with its own scope, plugins and rules.
    Scoped(ScopedFragment),
}

/// Ordered fragment-array configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FlatConfig {
    /// Fragments in application order.
    pub fragments: Vec<FlatFragment>,
}

impl FlatConfig {
    /// Scoped fragments in order.
    pub fn scoped(&self) -> impl Iterator<Item = &ScopedFragment> {
        self.fragments.iter().filter_map(|f| match f {
            FlatFragment::Scoped(s) => Some(s),
            FlatFragment::Shared(_) => None,
        })
    }

    /// Rules declared across all scoped fragments, later fragments
    /// overriding earlier ones.
    #[must_use]
    pub fn effective_rules(&self) -> RuleCatalog {
        let mut merged = RuleCatalog::new();
        for fragment in self.scoped() {
            for (id, setting) in fragment.rules.iter() {
                merged.insert(id, setting.clone());
            }
        }
        merged
    }
}

/// The exported configuration, in either shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigurationDocument {
    /// Single-object shape.
    Legacy(LegacyConfig),
    /// Fragment-array shape.
    Flat(FlatConfig),
}

impl ConfigurationDocument {
    /// Shape of this document.
    #[must_use]
    pub fn flavor(&self) -> Flavor {
        match self {
            Self::Legacy(_) => Flavor::Legacy,
            Self::Flat(_) => Flavor::Modern,
        }
    }

    /// The rule view of the document; for flat documents, the merge of
    /// every scoped fragment.
    #[must_use]
    pub fn rules(&self) -> RuleCatalog {
        match self {
            Self::Legacy(c) => c.rules.clone(),
            Self::Flat(c) => c.effective_rules(),
        }
    }

    /// Serializes the document to a JSON value.
    ///
    /// This is a model view for inspection and comparison. Shared configs
    /// appear as their expression string and plugins as a name to package
    /// map, so a flat document's JSON is not something ESLint can load;
    /// [`render_module`](crate::render_module) produces the file ESLint reads.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule option cannot be represented as JSON.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Checks structural validity and catalog invariants.
    #[must_use]
    pub fn validate(&self) -> Vec<DocumentIssue> {
        let mut issues = Vec::new();
        match self {
            Self::Legacy(c) => {
                if c.extends.is_empty() {
                    issues.push(DocumentIssue::Structure("`extends` is empty".into()));
                }
                if c.rules.is_empty() {
                    issues.push(DocumentIssue::Structure("`rules` is empty".into()));
                }
                check_globs(&c.ignore_patterns, &mut issues);
                let plugins: Vec<&str> = c.plugins.iter().map(String::as_str).collect();
                issues.extend(c.rules.validate(&plugins).into_iter().map(DocumentIssue::Catalog));
            }
            Self::Flat(c) => {
                if c.scoped().next().is_none() {
                    issues.push(DocumentIssue::Structure("no scoped fragment".into()));
                }
                // ESLint merges `plugins` across the fragments matching a file.
                let plugins: Vec<&str> = c
                    .scoped()
                    .flat_map(|f| f.plugins.iter().map(|p| p.name.as_str()))
                    .collect();
                for (i, fragment) in c.scoped().enumerate() {
                    if fragment.files.is_empty() {
                        issues.push(DocumentIssue::Structure(format!(
                            "fragment {i} has no `files`"
                        )));
                    }
                    if fragment.rules.is_empty() {
                        issues.push(DocumentIssue::Structure(format!(
                            "fragment {i} has no `rules`"
                        )));
                    }
                    check_globs(&fragment.files, &mut issues);
                    check_globs(&fragment.ignores, &mut issues);
                    issues.extend(
                        fragment
                            .rules
                            .validate(&plugins)
                            .into_iter()
                            .map(DocumentIssue::Catalog),
                    );
                }
            }
        }
        issues
    }
}

fn check_globs(patterns: &[String], issues: &mut Vec<DocumentIssue>) {
    for p in patterns {
        if let Err(e) = glob::Pattern::new(p) {
            issues.push(DocumentIssue::Glob {
                pattern: p.clone(),
                message: e.msg.to_string(),
            });
        }
    }
}

/// A problem found while validating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentIssue {
    /// Shape requirement not met.
    Structure(String),
    /// Glob pattern that does not parse.
    Glob {
        /// The pattern.
        pattern: String,
        /// Parser message.
        message: String,
    },
    /// Catalog invariant broken.
    Catalog(CatalogIssue),
}

impl std::fmt::Display for DocumentIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure(msg) => write!(f, "{msg}"),
            Self::Glob { pattern, message } => write!(f, "invalid glob `{pattern}`: {message}"),
            Self::Catalog(issue) => write!(f, "{issue}"),
        }
    }
}

/// Compares the rule views of two documents.
#[must_use]
pub fn compare_documents(
    left: &ConfigurationDocument,
    right: &ConfigurationDocument,
) -> Vec<RuleMismatch> {
    compare_rules(&left.rules(), &right.rules())
}

/// Turns a plugin namespace into a usable JS identifier
/// (`jsdoc` stays, `@foo/bar` becomes `foo_bar`).
fn js_identifier(name: &str) -> String {
    let mut out: String = name
        .trim_start_matches('@')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if out.is_empty() || out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use serde_json::json;

    fn flat() -> FlatConfig {
        FlatConfig {
            fragments: vec![
                FlatFragment::Shared(SharedConfig {
                    binding: "js".into(),
                    package: "@eslint/js".into(),
                    expression: "js.configs.recommended".into(),
                }),
                FlatFragment::Scoped(ScopedFragment {
                    files: vec!["**/*.js".into()],
                    ignores: vec![],
                    language_options: None,
                    plugins: vec![PluginRef::new("jsdoc", "eslint-plugin-jsdoc")],
                    rules: RuleCatalog::new()
                        .rule("no-console", Severity::Off)
                        .rule("jsdoc/check-syntax", Severity::Warn),
                    settings: None,
                }),
                FlatFragment::Scoped(ScopedFragment {
                    files: vec!["test/**/*.js".into()],
                    ignores: vec![],
                    language_options: None,
                    plugins: vec![],
                    rules: RuleCatalog::new().rule("no-console", Severity::Error),
                    settings: None,
                }),
            ],
        }
    }

    #[test]
    fn later_fragments_override_earlier_rules() {
        let rules = flat().effective_rules();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.get("no-console").map(|s| s.severity()), Some(Severity::Error));
    }

    #[test]
    fn flat_serializes_as_fragment_array() {
        let doc = ConfigurationDocument::Flat(flat());
        let value = doc.to_json().unwrap();
        assert_eq!(value[0], json!("js.configs.recommended"));
        assert_eq!(value[1]["files"], json!(["**/*.js"]));
        assert_eq!(value[1]["plugins"], json!({"jsdoc": "eslint-plugin-jsdoc"}));
        assert_eq!(value[1]["rules"]["jsdoc/check-syntax"], json!(1));
        assert!(doc.validate().is_empty());
    }

    #[test]
    fn plugin_declared_in_earlier_fragment_covers_later_ones() {
        let mut config = flat();
        if let FlatFragment::Scoped(s) = &mut config.fragments[2] {
            s.rules = s.rules.clone().rule("jsdoc/require-jsdoc", Severity::Warn);
        }
        assert_eq!(ConfigurationDocument::Flat(config).validate(), vec![]);
    }

    #[test]
    fn plugin_declared_by_no_fragment_is_reported() {
        let mut config = flat();
        if let FlatFragment::Scoped(s) = &mut config.fragments[2] {
            s.rules = s.rules.clone().rule("import/no-cycle", Severity::Warn);
        }
        let issues = ConfigurationDocument::Flat(config).validate();
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            &issues[0],
            DocumentIssue::Catalog(CatalogIssue::UndeclaredPlugin { plugin, .. })
                if plugin == "import"
        ));
    }

    #[test]
    fn legacy_validation_checks_shape_and_globs() {
        let doc = ConfigurationDocument::Legacy(LegacyConfig {
            parser_options: ParserOptions { ecma_version: 2020 },
            env: BTreeMap::new(),
            extends: vec![],
            plugins: vec![],
            rules: RuleCatalog::new(),
            settings: None,
            ignore_patterns: vec!["docs/[".into()],
        });
        let issues = doc.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().any(|i| matches!(i, DocumentIssue::Glob { .. })));
    }

    #[test]
    fn flavor_constants() {
        assert_eq!(Flavor::Legacy.config_file_name(), ".eslint.js");
        assert_eq!(Flavor::Modern.config_file_name(), "eslint.config.mjs");
        assert_eq!(
            Flavor::Legacy.scripts()[0],
            ("lint", "eslint -c .eslint.js --fix .".to_string())
        );
        assert_eq!(Flavor::Modern.scripts().len(), 1);
        assert_eq!("flat".parse::<Flavor>(), Ok(Flavor::Modern));
        assert_eq!(
            serde_json::from_value::<Flavor>(json!("flat")).unwrap(),
            Flavor::Modern
        );
        assert!("other".parse::<Flavor>().is_err());
    }

    #[test]
    fn js_identifier_sanitizes_scoped_names() {
        assert_eq!(js_identifier("jsdoc"), "jsdoc");
        assert_eq!(js_identifier("@stylistic/js"), "stylistic_js");
        assert_eq!(js_identifier("1x"), "_1x");
    }
}
