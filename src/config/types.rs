//! Document entries declared by a catalog and the documents selected from it

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One agreement template listed under `documents:` in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Template path relative to the catalog directory.
    pub path: PathBuf,
    #[serde(default)]
    pub title: Option<String>,
    /// Customer types this document applies to, e.g. `provider`, `organization`.
    #[serde(default)]
    pub customer_types: Vec<String>,
}

impl DocumentEntry {
    pub fn applies_to(&self, customer_type: &str) -> bool {
        self.customer_types.iter().any(|t| t == customer_type)
    }
}

/// A template chosen for rendering, either a catalog document or a common
/// file matched by `common_globs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    /// Catalog key, or the slash-separated relative path for common files.
    pub key: String,
    pub title: Option<String>,
    /// Path relative to the template root.
    pub relative: PathBuf,
    /// Path on disk.
    pub source: PathBuf,
}
