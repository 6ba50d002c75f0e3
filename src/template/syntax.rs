//! Placeholder syntax: the delimiter pair and the rule a name must satisfy

use crate::constants::{DEFAULT_CLOSE_DELIMITER, DEFAULT_OPEN_DELIMITER};
use crate::error::{Error, Result};
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Opening and closing delimiter of a placeholder marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    #[serde(default = "get_default_open")]
    pub open: String,
    #[serde(default = "get_default_close")]
    pub close: String,
}

impl Delimiters {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self> {
        let delimiters = Self { open: open.into(), close: close.into() };
        delimiters.validate()?;
        Ok(delimiters)
    }

    /// Parses the `OPEN,CLOSE` form accepted on the command line.
    pub fn from_pair(pair: &str) -> Result<Self> {
        let (open, close) = pair.split_once(',').ok_or_else(|| {
            Error::ConfigValidation(format!(
                "delimiters '{pair}' must be given as OPEN,CLOSE"
            ))
        })?;
        Self::new(open, close)
    }

    /// Neither delimiter may be empty, and neither may contain the other,
    /// otherwise scanning becomes ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(Error::ConfigValidation("delimiters must not be empty".into()));
        }
        if self.open.contains(&self.close) || self.close.contains(&self.open) {
            return Err(Error::ConfigValidation(format!(
                "delimiters '{}' and '{}' overlap",
                self.open, self.close
            )));
        }
        Ok(())
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self { open: get_default_open(), close: get_default_close() }
    }
}

fn get_default_open() -> String {
    DEFAULT_OPEN_DELIMITER.to_string()
}

fn get_default_close() -> String {
    DEFAULT_CLOSE_DELIMITER.to_string()
}

/// Built-in naming conventions selectable from configuration or the CLI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum NameRuleKind {
    /// Any non-empty name.
    #[default]
    Any,
    /// `EFFECTIVE_DATE` style: upper-case letters, digits and underscores.
    Upper,
    /// Letters, digits and underscores, not starting with a digit.
    Identifier,
}

/// Rule a trimmed placeholder name must satisfy. Matching is always case-sensitive.
#[derive(Debug, Clone, Default)]
pub enum NameRule {
    #[default]
    Any,
    Upper,
    Identifier,
    Pattern(Regex),
}

impl NameRule {
    /// Builds a rule from a user supplied regex, anchored at both ends.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(&format!("^(?:{pattern})$"))?))
    }

    pub fn accepts(&self, name: &str) -> bool {
        match self {
            NameRule::Any => !name.is_empty(),
            NameRule::Upper => {
                let mut chars = name.chars();
                chars.next().is_some_and(|c| c.is_ascii_uppercase())
                    && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            }
            NameRule::Identifier => {
                let mut chars = name.chars();
                chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            NameRule::Pattern(re) => re.is_match(name),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            NameRule::Any => "any non-empty name".to_string(),
            NameRule::Upper => "UPPER_CASE_WITH_UNDERSCORES".to_string(),
            NameRule::Identifier => "an identifier".to_string(),
            NameRule::Pattern(re) => format!("pattern {}", re.as_str()),
        }
    }
}

impl From<NameRuleKind> for NameRule {
    fn from(kind: NameRuleKind) -> Self {
        match kind {
            NameRuleKind::Any => NameRule::Any,
            NameRuleKind::Upper => NameRule::Upper,
            NameRuleKind::Identifier => NameRule::Identifier,
        }
    }
}

/// Everything the parser needs to recognise placeholder markers.
#[derive(Debug, Clone, Default)]
pub struct Syntax {
    pub delimiters: Delimiters,
    pub name_rule: NameRule,
}

impl Syntax {
    pub fn new(delimiters: Delimiters, name_rule: NameRule) -> Result<Self> {
        delimiters.validate()?;
        Ok(Self { delimiters, name_rule })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delimiters_are_double_braces() {
        let d = Delimiters::default();
        assert_eq!(d.open, "{{");
        assert_eq!(d.close, "}}");
    }

    #[test]
    fn delimiters_from_pair() {
        let d = Delimiters::from_pair("[[,]]").unwrap();
        assert_eq!(d, Delimiters { open: "[[".into(), close: "]]".into() });
        assert!(Delimiters::from_pair("[[").is_err());
        assert!(Delimiters::from_pair(",]]").is_err());
    }

    #[test]
    fn overlapping_delimiters_are_rejected() {
        assert!(Delimiters::new("<", "<<").is_err());
        assert!(Delimiters::new("%", "%").is_err());
    }

    #[test]
    fn delimiters_deserialize_with_defaults() {
        let d: Delimiters = serde_json::from_str(r#"{"open": "<%"}"#).unwrap();
        assert_eq!(d.open, "<%");
        assert_eq!(d.close, "}}");
    }

    #[test]
    fn upper_rule() {
        let rule = NameRule::Upper;
        assert!(rule.accepts("EFFECTIVE_DATE"));
        assert!(rule.accepts("FEE_2026"));
        assert!(!rule.accepts("effective_date"));
        assert!(!rule.accepts("Effective_Date"));
        assert!(!rule.accepts("_FEE"));
        assert!(!rule.accepts(""));
    }

    #[test]
    fn identifier_rule() {
        let rule = NameRule::Identifier;
        assert!(rule.accepts("provider_name"));
        assert!(rule.accepts("_hidden"));
        assert!(!rule.accepts("2fast"));
        assert!(!rule.accepts("has space"));
    }

    #[test]
    fn pattern_rule_is_anchored_and_case_sensitive() {
        let rule = NameRule::pattern("[A-Z]+").unwrap();
        assert!(rule.accepts("DAYS"));
        assert!(!rule.accepts("days"));
        assert!(!rule.accepts("DAYS2"));
        assert!(NameRule::pattern("(").is_err());
    }

    #[test]
    fn name_rule_kind_deserializes_lowercase() {
        let kind: NameRuleKind = serde_yaml::from_str("upper").unwrap();
        assert_eq!(kind, NameRuleKind::Upper);
        assert!(matches!(NameRule::from(kind), NameRule::Upper));
    }
}
