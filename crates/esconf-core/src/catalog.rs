//! Ordered rule catalogs and the checks that keep them consistent.

use crate::types::{RuleSetting, Severity};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::HashSet;

/// Ordered mapping from rule identifier to its setting.
///
/// Identifiers are either bare (`indent`) or namespaced by a plugin
/// (`jsdoc/check-syntax`). Insertion order is kept so rendered
/// configuration reads in the order rules were declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleCatalog {
    entries: Vec<(String, RuleSetting)>,
}

impl RuleCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, builder style.
    ///
    /// Duplicates are kept so [`RuleCatalog::validate`] can report them.
    #[must_use]
    pub fn rule(mut self, id: impl Into<String>, setting: impl Into<RuleSetting>) -> Self {
        self.entries.push((id.into(), setting.into()));
        self
    }

    /// Appends every rule of `other`, builder style.
    #[must_use]
    pub fn extend(mut self, other: &RuleCatalog) -> Self {
        self.entries.extend(other.entries.iter().cloned());
        self
    }

    /// Inserts or replaces a rule, returning the previous setting.
    pub fn insert(&mut self, id: impl Into<String>, setting: RuleSetting) -> Option<RuleSetting> {
        let id = id.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == id) {
            return Some(std::mem::replace(&mut slot.1, setting));
        }
        self.entries.push((id, setting));
        None
    }

    /// Looks up a rule setting by identifier.
    ///
    /// When a catalog holds duplicates the last declaration wins, which
    /// matches how ESLint reads an object literal.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&RuleSetting> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the catalog declares `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of declared entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts rules per severity as `(off, warn, error)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.entries
            .iter()
            .fold((0, 0, 0), |(off, warn, error), (_, s)| match s.severity() {
                Severity::Off => (off + 1, warn, error),
                Severity::Warn => (off, warn + 1, error),
                Severity::Error => (off, warn, error + 1),
            })
    }

    /// Plugin namespaces referenced by the catalog, in first-seen order.
    #[must_use]
    pub fn plugin_namespaces(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for (id, _) in &self.entries {
            if let Some((ns, _)) = id.split_once('/') {
                if !seen.contains(&ns) {
                    seen.push(ns);
                }
            }
        }
        seen
    }

    /// Checks catalog invariants against the plugins a document declares.
    ///
    /// Reports duplicate identifiers, malformed namespaces (empty prefix,
    /// empty rule name or nested slashes) and namespaces whose plugin is
    /// not in `declared_plugins`.
    #[must_use]
    pub fn validate(&self, declared_plugins: &[&str]) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for (id, _) in &self.entries {
            if !seen.insert(id.as_str()) {
                issues.push(CatalogIssue::Duplicate { id: id.clone() });
            }

            if let Some((ns, name)) = id.split_once('/') {
                if ns.is_empty() || name.is_empty() || name.contains('/') {
                    issues.push(CatalogIssue::MalformedId { id: id.clone() });
                } else if !declared_plugins.contains(&ns) {
                    issues.push(CatalogIssue::UndeclaredPlugin {
                        id: id.clone(),
                        plugin: ns.to_string(),
                    });
                }
            } else if id.is_empty() {
                issues.push(CatalogIssue::MalformedId { id: id.clone() });
            }
        }

        issues
    }
}

impl Serialize for RuleCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, setting) in &self.entries {
            map.serialize_entry(id, setting)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<RuleSetting>> FromIterator<(K, V)> for RuleCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A broken catalog invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// The same identifier is declared more than once.
    Duplicate {
        /// Offending identifier.
        id: String,
    },
    /// The identifier is empty or not of the form `plugin/rule`.
    MalformedId {
        /// Offending identifier.
        id: String,
    },
    /// The identifier names a plugin the document does not load.
    UndeclaredPlugin {
        /// Offending identifier.
        id: String,
        /// Plugin namespace taken from the identifier.
        plugin: String,
    },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Duplicate { id } => write!(f, "rule `{id}` is declared more than once"),
            Self::MalformedId { id } => write!(f, "rule identifier `{id}` is malformed"),
            Self::UndeclaredPlugin { id, plugin } => {
                write!(f, "rule `{id}` uses plugin `{plugin}` which is not declared")
            }
        }
    }
}

/// A difference between two catalogs.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleMismatch {
    /// Present on the left side only.
    MissingRight {
        /// Rule identifier.
        id: String,
    },
    /// Present on the right side only.
    MissingLeft {
        /// Rule identifier.
        id: String,
    },
    /// Present on both sides with different settings.
    Differs {
        /// Rule identifier.
        id: String,
        /// Left-hand setting.
        left: RuleSetting,
        /// Right-hand setting.
        right: RuleSetting,
    },
}

impl std::fmt::Display for RuleMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRight { id } => write!(f, "`{id}` only in the left catalog"),
            Self::MissingLeft { id } => write!(f, "`{id}` only in the right catalog"),
            Self::Differs { id, left, right } => write!(
                f,
                "`{id}` differs: {} vs {}",
                left.to_json(),
                right.to_json()
            ),
        }
    }
}

/// Compares the effective settings of two catalogs.
///
/// Returns an empty list when every identifier on either side resolves
/// to an identical setting on the other.
#[must_use]
pub fn compare_rules(left: &RuleCatalog, right: &RuleCatalog) -> Vec<RuleMismatch> {
    let mut out = Vec::new();
    let mut checked: HashSet<&str> = HashSet::new();

    for (id, l) in left.iter() {
        if !checked.insert(id) {
            continue;
        }
        let l = left.get(id).unwrap_or(l);
        match right.get(id) {
            None => out.push(RuleMismatch::MissingRight { id: id.to_string() }),
            Some(r) if r != l => out.push(RuleMismatch::Differs {
                id: id.to_string(),
                left: l.clone(),
                right: r.clone(),
            }),
            Some(_) => {}
        }
    }

    for (id, _) in right.iter() {
        if !left.contains(id) && checked.insert(id) {
            out.push(RuleMismatch::MissingLeft { id: id.to_string() });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> RuleCatalog {
        RuleCatalog::new()
            .rule("no-console", Severity::Off)
            .rule(
                "quotes",
                RuleSetting::with_options(Severity::Error, [json!("double")]),
            )
            .rule("jsdoc/check-syntax", Severity::Warn)
    }

    #[test]
    fn serializes_in_declaration_order() {
        let text = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            text,
            r#"{"no-console":0,"quotes":[2,"double"],"jsdoc/check-syntax":1}"#
        );
    }

    #[test]
    fn validate_accepts_declared_plugins() {
        assert!(sample().validate(&["jsdoc"]).is_empty());
    }

    #[test]
    fn validate_reports_duplicates_and_bad_namespaces() {
        let catalog = sample()
            .rule("no-console", Severity::Warn)
            .rule("/oops", Severity::Warn)
            .rule("react/jsx-key", Severity::Error);

        let issues = catalog.validate(&["jsdoc"]);
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&CatalogIssue::Duplicate {
            id: "no-console".into()
        }));
        assert!(issues.contains(&CatalogIssue::MalformedId { id: "/oops".into() }));
        assert!(issues.contains(&CatalogIssue::UndeclaredPlugin {
            id: "react/jsx-key".into(),
            plugin: "react".into(),
        }));
    }

    #[test]
    fn last_declaration_wins_on_lookup() {
        let catalog = sample().rule("no-console", Severity::Error);
        assert_eq!(
            catalog.get("no-console"),
            Some(&RuleSetting::Level(Severity::Error))
        );
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut catalog = sample();
        let prev = catalog.insert("no-console", Severity::Warn.into());
        assert_eq!(prev, Some(RuleSetting::Level(Severity::Off)));
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.iter().next().map(|(id, _)| id), Some("no-console"));
    }

    #[test]
    fn compare_reports_each_kind_of_mismatch() {
        let left = sample();
        let right = RuleCatalog::new()
            .rule("no-console", Severity::Warn)
            .rule(
                "quotes",
                RuleSetting::with_options(Severity::Error, [json!("double")]),
            )
            .rule("camelcase", Severity::Off);

        let diff = compare_rules(&left, &right);
        assert_eq!(diff.len(), 3);
        assert!(matches!(&diff[0], RuleMismatch::Differs { id, .. } if id == "no-console"));
        assert!(
            matches!(&diff[1], RuleMismatch::MissingRight { id } if id == "jsdoc/check-syntax")
        );
        assert!(matches!(&diff[2], RuleMismatch::MissingLeft { id } if id == "camelcase"));
    }

    #[test]
    fn compare_equal_catalogs_is_empty() {
        assert!(compare_rules(&sample(), &sample()).is_empty());
    }

    #[test]
    fn counts_by_severity() {
        assert_eq!(sample().count_by_severity(), (1, 1, 1));
        assert_eq!(sample().plugin_namespaces(), vec!["jsdoc"]);
    }
}
