//! Core ESLint style rules.

use esconf_core::{RuleCatalog, RuleSetting, Severity};
use serde_json::json;

/// Returns the core (non-plugin) rules.
///
/// | Rule | Setting |
/// |------|---------|
/// | `no-console` | off |
/// | `indent` | error, 4 spaces, `SwitchCase: 1` |
/// | `quotes` | error, double |
/// | `max-len` | warn, 900 columns |
/// | `camelcase` | off |
/// | `new-cap`, `no-invalid-this`, `no-undef`, `prefer-const`, `guard-for-in` | warn |
#[must_use]
pub fn style_rules() -> RuleCatalog {
    RuleCatalog::new()
        .rule("no-console", Severity::Off)
        .rule(
            "indent",
            RuleSetting::with_options(Severity::Error, [json!(4), json!({"SwitchCase": 1})]),
        )
        .rule(
            "quotes",
            RuleSetting::with_options(Severity::Error, [json!("double")]),
        )
        .rule(
            "max-len",
            RuleSetting::with_options(Severity::Warn, [json!({"code": 900})]),
        )
        .rule("camelcase", Severity::Off)
        .rule("new-cap", Severity::Warn)
        .rule("no-invalid-this", Severity::Warn)
        .rule("no-undef", Severity::Warn)
        .rule("prefer-const", Severity::Warn)
        .rule("guard-for-in", Severity::Warn)
}
