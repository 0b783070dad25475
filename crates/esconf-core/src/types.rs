//! Core types for rule severities and per-rule settings.

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity level understood by ESLint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Rule reports a warning.
    Warn,
    /// Rule reports an error.
    Error,
}

impl Severity {
    /// Returns the numeric level ESLint uses for this severity.
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Warn => 1,
            Self::Error => 2,
        }
    }

    /// Parses a numeric level (`0`, `1`, `2`).
    #[must_use]
    pub fn from_level(level: u64) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Warn),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    /// Parses a severity name (`off`, `warn`, `error`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "off" => Some(Self::Off),
            "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeverityVisitor;

        impl Visitor<'_> for SeverityVisitor {
            type Value = Severity;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a severity level (0, 1, 2) or name (off, warn, error)")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Severity, E> {
                Severity::from_level(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Severity, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(Severity::from_level)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Severity, E> {
                Severity::from_name(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// Severity descriptor for a single rule.
///
/// Serializes the way ESLint expects: a bare level (`1`) or an array
/// whose first element is the level and the rest are rule options
/// (`[2, 4, {"SwitchCase": 1}]`).
#[derive(Debug, Clone, PartialEq)]
pub enum RuleSetting {
    /// Severity without options.
    Level(Severity),
    /// Severity followed by rule-specific options.
    WithOptions(Severity, Vec<Value>),
}

impl RuleSetting {
    /// Creates a setting with options.
    #[must_use]
    pub fn with_options(severity: Severity, options: impl IntoIterator<Item = Value>) -> Self {
        Self::WithOptions(severity, options.into_iter().collect())
    }

    /// Returns the severity of this setting.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::Level(s) | Self::WithOptions(s, _) => *s,
        }
    }

    /// Returns the rule options, empty for bare levels.
    #[must_use]
    pub fn options(&self) -> &[Value] {
        match self {
            Self::Level(_) => &[],
            Self::WithOptions(_, opts) => opts,
        }
    }

    /// Returns `true` if the rule is switched off.
    #[must_use]
    pub fn is_off(&self) -> bool {
        self.severity() == Severity::Off
    }

    /// JSON value for this setting (`1`, `[2, "double"]`).
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Level(s) => Value::from(s.level()),
            Self::WithOptions(s, opts) => {
                let mut arr = Vec::with_capacity(opts.len() + 1);
                arr.push(Value::from(s.level()));
                arr.extend(opts.iter().cloned());
                Value::Array(arr)
            }
        }
    }
}

impl From<Severity> for RuleSetting {
    fn from(severity: Severity) -> Self {
        Self::Level(severity)
    }
}

impl Serialize for RuleSetting {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Level(s) => s.serialize(serializer),
            Self::WithOptions(s, opts) => {
                let mut seq = serializer.serialize_seq(Some(opts.len() + 1))?;
                seq.serialize_element(s)?;
                for opt in opts {
                    seq.serialize_element(opt)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for RuleSetting {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SettingVisitor;

        impl<'de> Visitor<'de> for SettingVisitor {
            type Value = RuleSetting;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a severity or an array [severity, ...options]")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<RuleSetting, E> {
                Severity::from_level(v)
                    .map(RuleSetting::Level)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<RuleSetting, E> {
                u64::try_from(v)
                    .ok()
                    .and_then(Severity::from_level)
                    .map(RuleSetting::Level)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Signed(v), &self))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<RuleSetting, E> {
                Severity::from_name(v)
                    .map(RuleSetting::Level)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RuleSetting, A::Error> {
                let severity: Severity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let mut options = Vec::new();
                while let Some(opt) = seq.next_element::<Value>()? {
                    options.push(opt);
                }
                // `[0]` is a bare level written as an array
                if options.is_empty() {
                    Ok(RuleSetting::Level(severity))
                } else {
                    Ok(RuleSetting::WithOptions(severity, options))
                }
            }
        }

        deserializer.deserialize_any(SettingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_serializes_as_level() {
        assert_eq!(serde_json::to_value(Severity::Warn).unwrap(), json!(1));
        assert_eq!(Severity::Error.to_string(), "error");
    }

    #[test]
    fn severity_accepts_names_and_levels() {
        let s: Severity = serde_json::from_value(json!("warn")).unwrap();
        assert_eq!(s, Severity::Warn);
        let s: Severity = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(s, Severity::Error);
        assert!(serde_json::from_value::<Severity>(json!(3)).is_err());
    }

    #[test]
    fn setting_with_options_serializes_as_array() {
        let setting =
            RuleSetting::with_options(Severity::Error, [json!(4), json!({"SwitchCase": 1})]);
        assert_eq!(
            serde_json::to_value(&setting).unwrap(),
            json!([2, 4, {"SwitchCase": 1}])
        );
        assert_eq!(setting.to_json(), json!([2, 4, {"SwitchCase": 1}]));
    }

    #[test]
    fn single_element_array_reads_as_bare_level() {
        let setting: RuleSetting = serde_json::from_value(json!([0])).unwrap();
        assert_eq!(setting, RuleSetting::Level(Severity::Off));
        assert!(setting.is_off());
    }

    #[test]
    fn named_severity_array_reads_options() {
        let setting: RuleSetting =
            serde_json::from_value(json!(["warn", {"definedTags": ["project"]}])).unwrap();
        assert_eq!(setting.severity(), Severity::Warn);
        assert_eq!(setting.options().len(), 1);
    }
}
