//! Choosing which templates apply to a customer type

use crate::config::loader::ConfigV1;
use crate::config::types::SelectedDocument;
use crate::constants::CONFIG_FILENAMES;
use crate::error::{Error, Result};
use crate::ext::PathExt;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

impl ConfigV1 {
    /// Documents for `customer_type` in catalog order, followed by the common
    /// files matched by `common_globs` in path order.
    ///
    /// # Errors
    /// `Error::UnknownCustomerType` when no catalog document lists the type.
    pub fn select<P: AsRef<Path>>(
        &self,
        template_root: P,
        customer_type: &str,
    ) -> Result<Vec<SelectedDocument>> {
        let template_root = template_root.as_ref();
        let mut selected: Vec<SelectedDocument> = self
            .documents
            .iter()
            .filter(|(_, document)| document.applies_to(customer_type))
            .map(|(key, document)| SelectedDocument {
                key: key.clone(),
                title: document.title.clone(),
                relative: document.path.clone(),
                source: template_root.join(&document.path),
            })
            .collect();

        if selected.is_empty() {
            return Err(Error::UnknownCustomerType {
                customer_type: customer_type.to_string(),
                known: self.customer_types().join(", "),
            });
        }

        let common = self.common_documents(template_root)?;
        log::info!(
            "Selected {} documents and {} common files for '{customer_type}'",
            selected.len(),
            common.len()
        );
        selected.extend(common);
        Ok(selected)
    }

    /// Files matched by `common_globs`. Catalog documents never count as
    /// common files, whichever customer types they are listed for.
    fn common_documents(&self, template_root: &Path) -> Result<Vec<SelectedDocument>> {
        if self.common_globs.is_empty() {
            return Ok(Vec::new());
        }
        let globs = build_globset(&self.common_globs)?;
        let catalog_paths: HashSet<String> =
            self.documents.values().map(|d| d.path.to_slash_string()).collect();

        let mut found = Vec::new();
        for entry in WalkDir::new(template_root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(template_root)
                .map_err(|e| Error::Other(e.into()))?;
            let key = relative.to_slash_string();
            if CONFIG_FILENAMES.contains(&key.as_str()) || catalog_paths.contains(&key) {
                continue;
            }
            if globs.is_match(relative) {
                log::debug!("Common file matched: {key}");
                found.push(SelectedDocument {
                    key,
                    title: None,
                    relative: relative.to_path_buf(),
                    source: entry.path().to_path_buf(),
                });
            }
        }
        Ok(found)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(GlobBuilder::new(pattern).literal_separator(true).build()?);
    }
    Ok(builder.build()?)
}
