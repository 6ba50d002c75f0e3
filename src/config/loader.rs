//! Catalog configuration loading and validation

use crate::config::types::DocumentEntry;
use crate::constants::CONFIG_FILENAMES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use crate::renderer::{RenderOptions, UnresolvedPolicy};
use crate::template::{Delimiters, NameRule, NameRuleKind, Syntax};
use crate::values::ValueMap;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Catalog of agreement templates and the settings used to render them
#[derive(Debug, Deserialize, Serialize)]
pub struct ConfigV1 {
    #[serde(default)]
    pub delimiters: Delimiters,
    #[serde(default)]
    pub name_rule: NameRuleKind,
    /// Regex a name must match in full; overrides `name_rule` when set.
    #[serde(default)]
    pub name_pattern: Option<String>,
    #[serde(default)]
    pub unresolved: UnresolvedPolicy,
    #[serde(default)]
    pub strict: bool,
    /// Replaces the extension of every output file, e.g. `.txt`.
    #[serde(default)]
    pub output_suffix: Option<String>,
    /// Files rendered for every customer type.
    #[serde(default)]
    pub common_globs: Vec<String>,
    #[serde(default)]
    pub documents: IndexMap<String, DocumentEntry>,
    /// Values applied before any user supplied values.
    #[serde(default)]
    pub defaults: serde_json::Map<String, serde_json::Value>,
}

impl ConfigV1 {
    pub fn validate<P: AsRef<Path>>(&self, template_root: P) -> Result<()> {
        let template_root = template_root.as_ref();
        self.delimiters.validate()?;
        self.name_rule()?;

        if let Some(suffix) = &self.output_suffix {
            if !suffix.starts_with('.') || suffix.len() < 2 {
                return Err(Error::ConfigValidation(
                    "output_suffix must start with '.' and have at least 1 character after it".into(),
                ));
            }
        }

        for pattern in &self.common_globs {
            globset::GlobBuilder::new(pattern).literal_separator(true).build()?;
        }

        for (key, document) in &self.documents {
            if !document.path.is_contained_relative() {
                return Err(Error::ConfigValidation(format!(
                    "document '{key}' path '{}' must be relative to the catalog directory",
                    document.path.display()
                )));
            }
            if document.customer_types.is_empty() {
                return Err(Error::ConfigValidation(format!(
                    "document '{key}' must list at least one customer type"
                )));
            }
            let source = template_root.join(&document.path);
            if !source.is_file() {
                return Err(Error::TemplateDoesNotExistsError {
                    path: source.display().to_string(),
                });
            }
        }

        self.default_values()?;
        Ok(())
    }

    pub fn name_rule(&self) -> Result<NameRule> {
        match &self.name_pattern {
            Some(pattern) => NameRule::pattern(pattern),
            None => Ok(self.name_rule.into()),
        }
    }

    pub fn render_options(&self) -> Result<RenderOptions> {
        let syntax = Syntax::new(self.delimiters.clone(), self.name_rule()?)?;
        Ok(RenderOptions::default()
            .with_syntax(syntax)
            .with_policy(self.unresolved)
            .with_strict(self.strict))
    }

    pub fn default_values(&self) -> Result<ValueMap> {
        ValueMap::from_json_object(&self.defaults)
    }

    /// Every customer type mentioned by a document, in catalog order.
    pub fn customer_types(&self) -> Vec<String> {
        self.documents
            .values()
            .flat_map(|document| document.customer_types.iter().cloned())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Where a rendered template lands relative to the output directory.
    pub fn output_path(&self, relative: &Path) -> PathBuf {
        match &self.output_suffix {
            Some(suffix) => relative.with_extension(&suffix[1..]),
            None => relative.to_path_buf(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "schemaVersion")]
pub enum Config {
    #[serde(rename = "v1")]
    V1(ConfigV1),
}

impl Config {
    pub fn load_config<P: AsRef<Path>>(template_root: P) -> Result<Self> {
        let template_root = template_root.as_ref().to_path_buf();
        let template_dir = template_root.to_str_checked()?.to_string();

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = template_root.join(config_file_name);

            if config_file_path.exists() {
                log::debug!("Loading catalog from {}", config_file_path.display());
                let content = std::fs::read_to_string(config_file_path)?;
                let config: Config = match *config_file_name {
                    "formfill.json" => serde_json::from_str(&content)?,
                    "formfill.yaml" | "formfill.yml" => serde_yaml::from_str(&content)?,
                    _ => unreachable!(),
                };

                return Ok(config);
            }
        }

        Err(Error::ConfigNotFound {
            template_dir,
            config_files: CONFIG_FILENAMES.join(", "),
        })
    }

    /// Loads and validates the catalog in `template_root`.
    pub fn load_validated<P: AsRef<Path>>(template_root: P) -> Result<ConfigV1> {
        let Config::V1(config) = Self::load_config(&template_root)?;
        config.validate(&template_root)?;
        Ok(config)
    }
}
