//! Value mappings supplied to a render
//!
//! - `format`: Turning dates, currency amounts and counts into replacement text
//! - `collector`: Merging values files, `NAME=VALUE` pairs and prompts into one mapping

pub mod collector;
pub mod format;

pub use collector::ValueCollector;

use crate::error::{Error, Result};
use crate::ext::PathExt;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

/// Placeholder name to replacement text, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueMap(IndexMap<String, String>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Later values override earlier ones.
    pub fn merge(&mut self, other: ValueMap) {
        self.0.extend(other.0);
    }

    /// Builds a mapping from a JSON object, formatting typed entries.
    pub fn from_json_object(object: &serde_json::Map<String, serde_json::Value>) -> Result<Self> {
        let mut values = Self::new();
        for (name, value) in object {
            values.insert(name.clone(), format::value_to_text(name, value)?);
        }
        Ok(values)
    }

    pub fn from_json_value(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(object) => Self::from_json_object(object),
            _ => Err(Error::ConfigValidation(
                "a values document must be an object of NAME: value pairs".into(),
            )),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        Self::from_json_value(&value)
    }

    /// YAML is a superset of JSON, so this also accepts JSON documents.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_yaml::from_str(content)?;
        Self::from_json_value(&value)
    }

    /// Loads a values file, choosing the parser by extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("Loading values from {}", path.to_str_checked()?);
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Parses a `NAME=VALUE` command-line assignment. Only the first `=` splits.
pub fn parse_assignment(assignment: &str) -> Result<(String, String)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(Error::InvalidAssignment(assignment.to_string())),
    }
}
