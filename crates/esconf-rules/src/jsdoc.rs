//! Rules from `eslint-plugin-jsdoc`.

use esconf_core::{RuleCatalog, RuleSetting, Severity};
use serde_json::{json, Value};

/// Plugin namespace.
pub const PLUGIN: &str = "jsdoc";

/// npm package providing the plugin.
pub const PACKAGE: &str = "eslint-plugin-jsdoc";

/// Rules enabled as plain warnings, in declaration order.
const WARN_RULES: &[&str] = &[
    "check-access",
    "check-alignment",
    "check-indentation",
    "check-line-alignment",
    "check-param-names",
    "check-property-names",
    "check-syntax",
    "check-tag-names",
    "check-types",
    "check-values",
    "empty-tags",
    "implements-on-classes",
    "match-description",
    "multiline-blocks",
    "no-bad-blocks",
    "no-defaults",
    "no-multi-asterisks",
    "no-undefined-types",
    "require-asterisk-prefix",
    "require-description",
    "require-description-complete-sentence",
    "require-hyphen-before-param-description",
    "require-jsdoc",
    "require-param",
    "require-param-description",
    "require-param-name",
    "require-param-type",
    "require-property",
    "require-property-description",
    "require-property-name",
    "require-property-type",
    "require-returns",
    "require-returns-check",
    "require-returns-description",
    "require-returns-type",
    "require-throws",
    "require-yields",
    "require-yields-check",
    "sort-tags",
    "tag-lines",
    "valid-types",
];

/// Options for rules that take them.
fn options(rule: &str) -> Option<Value> {
    match rule {
        "check-indentation" => Some(json!({
            "excludeTags": ["return", "returns", "openapi", "example"]
        })),
        "check-tag-names" => Some(json!({
            "definedTags": ["project", "return", "openapi", "createdOn"]
        })),
        _ => None,
    }
}

/// Returns the documentation-comment rules, namespaced `jsdoc/`.
#[must_use]
pub fn jsdoc_rules() -> RuleCatalog {
    WARN_RULES
        .iter()
        .map(|rule| {
            let setting = match options(rule) {
                Some(opts) => RuleSetting::with_options(Severity::Warn, [opts]),
                None => RuleSetting::Level(Severity::Warn),
            };
            (format!("{PLUGIN}/{rule}"), setting)
        })
        .collect()
}

/// Plugin settings shared by both flavors.
///
/// `@return` is reported in favor of `@returns`.
#[must_use]
pub fn jsdoc_settings() -> Value {
    json!({
        "jsdoc": {
            "tagNamePreference": {
                "return": "returns"
            }
        }
    })
}
