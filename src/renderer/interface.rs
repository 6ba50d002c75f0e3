use crate::error::Result;
use crate::template::Template;
use crate::values::ValueMap;

/// Output of one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// The document with every resolvable placeholder substituted.
    pub text: String,
    /// Referenced names with no value, distinct and in order of first occurrence.
    pub unresolved: Vec<String>,
    /// Mapping entries the template never referenced.
    pub unused: Vec<String>,
}

impl Rendered {
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer: Send + Sync {
    /// Parses template text with the renderer's syntax.
    ///
    /// # Returns
    /// * `Result<Template>` - The parsed template or `Error::MalformedTemplate`
    fn parse(&self, source: &str) -> Result<Template>;

    /// Renders a parsed template against a value mapping.
    ///
    /// # Arguments
    /// * `template` - Parsed template
    /// * `values` - Values for this render; may be partial or empty
    ///
    /// # Returns
    /// * `Result<Rendered>` - Rendered text plus unresolved and unused names
    fn render(&self, template: &Template, values: &ValueMap) -> Result<Rendered>;

    /// Parses and renders in one step.
    fn render_str(&self, source: &str, values: &ValueMap) -> Result<Rendered> {
        self.render(&self.parse(source)?, values)
    }

    /// Distinct placeholder names referenced by `source`.
    fn placeholders(&self, source: &str) -> Result<Vec<String>> {
        Ok(self.parse(source)?.placeholder_names())
    }
}
