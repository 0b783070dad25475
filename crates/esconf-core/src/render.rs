//! Renders configuration documents into the bootstrap module written
//! into consumer projects.
//!
//! Legacy documents become a CommonJS module exporting the document as
//! JSON. Flat documents become an ES module: plugin packages, `@eslint/js`
//! and `globals` are imported and referenced by binding, which plain JSON
//! cannot express.

use crate::document::{
    ConfigurationDocument, FlatConfig, FlatFragment, LegacyConfig, ScopedFragment,
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fmt::Write;

/// Indentation used for every rendered file.
pub const INDENT: &str = "    ";

/// Serializes `value` as JSON indented with [`INDENT`].
///
/// # Errors
///
/// Returns an error if `value` cannot be serialized.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Renders the bootstrap module for a document.
///
/// # Errors
///
/// Returns an error if rule options cannot be serialized.
pub fn render_module(doc: &ConfigurationDocument) -> Result<String, serde_json::Error> {
    match doc {
        ConfigurationDocument::Legacy(c) => render_legacy(c),
        ConfigurationDocument::Flat(c) => Ok(render_flat(c)),
    }
}

fn render_legacy(config: &LegacyConfig) -> Result<String, serde_json::Error> {
    let body = to_pretty_json(config)?;
    Ok(format!("\"use strict\";\n\nmodule.exports = {body};\n"))
}

fn render_flat(config: &FlatConfig) -> String {
    let mut imports: Vec<(String, String)> = Vec::new();
    let mut push_import = |binding: String, package: String| {
        if !imports.iter().any(|(b, _)| *b == binding) {
            imports.push((binding, package));
        }
    };

    for fragment in &config.fragments {
        match fragment {
            FlatFragment::Shared(s) => push_import(s.binding.clone(), s.package.clone()),
            FlatFragment::Scoped(s) => {
                if s.language_options.as_ref().is_some_and(|o| !o.globals.is_empty()) {
                    push_import("globals".into(), "globals".into());
                }
                for p in &s.plugins {
                    push_import(p.binding(), p.package.clone());
                }
            }
        }
    }

    let mut out = String::new();
    for (binding, package) in &imports {
        let _ = writeln!(out, "import {binding} from {};", quote(package));
    }
    if !imports.is_empty() {
        out.push('\n');
    }

    out.push_str("export default [\n");
    let last = config.fragments.len().saturating_sub(1);
    for (i, fragment) in config.fragments.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        match fragment {
            FlatFragment::Shared(s) => {
                let _ = writeln!(out, "{INDENT}{}{sep}", s.expression);
            }
            FlatFragment::Scoped(s) => {
                let _ = writeln!(out, "{INDENT}{}{sep}", scoped_object(s).render(1));
            }
        }
    }
    out.push_str("];\n");
    out
}

fn scoped_object(fragment: &ScopedFragment) -> Js {
    let mut fields = vec![JsEntry::field("files", strings(&fragment.files))];
    if !fragment.ignores.is_empty() {
        fields.push(JsEntry::field("ignores", strings(&fragment.ignores)));
    }

    if let Some(opts) = &fragment.language_options {
        let mut lang = vec![JsEntry::field(
            "ecmaVersion",
            Js::Value(Value::from(opts.ecma_version)),
        )];
        if let Some(source_type) = &opts.source_type {
            lang.push(JsEntry::field("sourceType", Js::Value(Value::from(source_type.as_str()))));
        }
        if !opts.globals.is_empty() {
            let spreads = opts
                .globals
                .iter()
                .map(|g| JsEntry::Spread(format!("globals.{g}")))
                .collect();
            lang.push(JsEntry::field("globals", Js::Object(spreads)));
        }
        fields.push(JsEntry::field("languageOptions", Js::Object(lang)));
    }

    if !fragment.plugins.is_empty() {
        let plugins = fragment
            .plugins
            .iter()
            .map(|p| JsEntry::field(p.name.clone(), Js::Raw(p.binding())))
            .collect();
        fields.push(JsEntry::field("plugins", Js::Object(plugins)));
    }

    if let Some(settings) = &fragment.settings {
        fields.push(JsEntry::field("settings", Js::Value(settings.clone())));
    }

    let rules = fragment
        .rules
        .iter()
        .map(|(id, setting)| JsEntry::field(id, Js::Inline(setting.to_json())))
        .collect();
    fields.push(JsEntry::field("rules", Js::Object(rules)));

    Js::Object(fields)
}

fn strings(items: &[String]) -> Js {
    Js::Inline(Value::from(items.to_vec()))
}

fn quote(s: &str) -> String {
    Value::from(s).to_string()
}

/// Minimal JS expression tree, enough for config objects.
enum Js {
    /// Raw expression emitted as-is (an identifier).
    Raw(String),
    /// JSON value emitted on one line.
    Inline(Value),
    /// JSON value emitted pretty-printed at the current depth.
    Value(Value),
    /// Object literal, one entry per line.
    Object(Vec<JsEntry>),
}

enum JsEntry {
    Field(String, Js),
    Spread(String),
}

impl JsEntry {
    fn field(key: impl Into<String>, value: Js) -> Self {
        Self::Field(key.into(), value)
    }
}

impl Js {
    fn render(&self, depth: usize) -> String {
        match self {
            Self::Raw(expr) => expr.clone(),
            Self::Inline(v) => inline_json(v),
            Self::Value(v) => {
                let pretty = to_pretty_json(v).unwrap_or_else(|_| v.to_string());
                let pad = INDENT.repeat(depth);
                pretty.replace('\n', &format!("\n{pad}"))
            }
            Self::Object(entries) if entries.is_empty() => "{}".to_string(),
            Self::Object(entries) => {
                let pad = INDENT.repeat(depth + 1);
                let mut out = String::from("{\n");
                for (i, entry) in entries.iter().enumerate() {
                    let sep = if i + 1 == entries.len() { "" } else { "," };
                    match entry {
                        JsEntry::Field(key, value) => {
                            let _ = writeln!(
                                out,
                                "{pad}{}: {}{sep}",
                                quote(key),
                                value.render(depth + 1)
                            );
                        }
                        JsEntry::Spread(expr) => {
                            let _ = writeln!(out, "{pad}...{expr}{sep}");
                        }
                    }
                }
                out.push_str(&INDENT.repeat(depth));
                out.push('}');
                out
            }
        }
    }
}

/// One-line JSON with a space after separators: `[2, {"code": 900}]`.
fn inline_json(value: &Value) -> String {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(inline_json).collect();
            format!("[{}]", parts.join(", "))
        }
        Value::Object(map) => {
            let parts: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", quote(k), inline_json(v)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
        other => other.to_string(),
    }
}
