use super::{interface::Rendered, RenderOptions, TemplateRenderer, UnresolvedPolicy};
use crate::{
    error::{Error, Result},
    template::{Segment, Template},
    values::ValueMap,
};
use indexmap::IndexSet;
use std::collections::HashSet;

/// Renderer for `{{NAME}}` style placeholder templates.
///
/// Values are emitted exactly as supplied; a value that itself looks like a
/// marker is never substituted again.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderRenderer {
    options: RenderOptions,
}

impl PlaceholderRenderer {
    /// Creates a renderer with `{{`/`}}` delimiters, any name, and the `keep` policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn parse(&self, source: &str) -> Result<Template> {
        Template::parse(source, &self.options.syntax)
    }

    fn render(&self, template: &Template, values: &ValueMap) -> Result<Rendered> {
        let mut text = String::with_capacity(template.source_len());
        let mut unresolved: IndexSet<&str> = IndexSet::new();
        let mut used: HashSet<&str> = HashSet::new();

        for segment in template.segments() {
            match segment {
                Segment::Literal(literal) => text.push_str(literal),
                Segment::Placeholder(placeholder) => {
                    match values.get(&placeholder.name) {
                        Some(value) => {
                            text.push_str(value);
                            used.insert(placeholder.name.as_str());
                        }
                        None => {
                            unresolved.insert(placeholder.name.as_str());
                            if self.options.policy == UnresolvedPolicy::Keep {
                                text.push_str(&placeholder.raw);
                            }
                        }
                    }
                }
            }
        }

        let unresolved: Vec<String> = unresolved.into_iter().map(str::to_string).collect();
        if self.options.policy == UnresolvedPolicy::Fail && !unresolved.is_empty() {
            return Err(Error::UnresolvedPlaceholders { names: unresolved });
        }

        let unused: Vec<String> = values
            .names()
            .filter(|name| !used.contains(name))
            .map(str::to_string)
            .collect();
        if self.options.strict {
            for name in &unused {
                log::warn!("Value '{name}' is not referenced by the template");
            }
        }

        log::debug!(
            "Rendered {} placeholders, {} unresolved, {} unused",
            template.placeholders().count(),
            unresolved.len(),
            unused.len()
        );
        Ok(Rendered { text, unresolved, unused })
    }
}
