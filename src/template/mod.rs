//! Parsed agreement templates
//!
//! This module contains the template model components:
//! - `syntax`: Delimiters and placeholder naming rules
//! - `parser`: Single-pass scanner that splits template text into segments

mod parser;
pub mod syntax;

pub use syntax::{Delimiters, NameRule, NameRuleKind, Syntax};

use crate::error::Result;
use indexmap::IndexSet;

/// A placeholder marker as it appeared in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Name with surrounding whitespace trimmed.
    pub name: String,
    /// The full marker, delimiters included, exactly as written.
    pub raw: String,
    /// Byte offset of the opening delimiter.
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// An ordered sequence of literal text interspersed with placeholder markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    source_len: usize,
}

impl Template {
    /// Parses `source` with the given syntax.
    ///
    /// # Errors
    /// `Error::MalformedTemplate` when delimiters are unbalanced or a name is invalid.
    pub fn parse(source: &str, syntax: &Syntax) -> Result<Self> {
        let segments = parser::parse_segments(source, syntax)?;
        Ok(Self { segments, source_len: source.len() })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(placeholder) => Some(placeholder),
            Segment::Literal(_) => None,
        })
    }

    /// Distinct placeholder names in order of first occurrence.
    pub fn placeholder_names(&self) -> Vec<String> {
        self.placeholders()
            .map(|p| p.name.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn has_placeholders(&self) -> bool {
        self.placeholders().next().is_some()
    }

    /// Length in bytes of the text the template was parsed from.
    pub fn source_len(&self) -> usize {
        self.source_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_names_are_distinct_and_ordered() {
        let template = Template::parse(
            "{{B}} and {{A}} then {{B}} again, {{ A }}",
            &Syntax::default(),
        )
        .unwrap();
        assert_eq!(template.placeholder_names(), vec!["B", "A"]);
        assert_eq!(template.placeholders().count(), 4);
    }

    #[test]
    fn plain_text_has_no_placeholders() {
        let template = Template::parse("No markers here.", &Syntax::default()).unwrap();
        assert!(!template.has_placeholders());
        assert_eq!(template.source_len(), 16);
    }
}
