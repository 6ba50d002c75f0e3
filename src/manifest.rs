use crate::constants::MANIFEST_FILENAME;
use crate::error::Result;
use crate::renderer::UnresolvedPolicy;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Record of one rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Template path relative to the catalog directory.
    pub template: String,
    /// Output path relative to the output directory.
    pub output: String,
    pub template_sha256: String,
    pub output_sha256: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

/// Written to the output directory after a `generate` run so a signed copy
/// can be traced back to the exact template revision it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub formfill_version: String,
    pub customer_type: String,
    pub generated_at: DateTime<Utc>,
    pub unresolved_policy: UnresolvedPolicy,
    pub documents: Vec<DocumentRecord>,
}

impl GenerationManifest {
    pub fn new(customer_type: impl Into<String>, unresolved_policy: UnresolvedPolicy) -> Self {
        Self {
            formfill_version: env!("CARGO_PKG_VERSION").to_string(),
            customer_type: customer_type.into(),
            generated_at: Utc::now(),
            unresolved_policy,
            documents: Vec::new(),
        }
    }

    pub fn path<P: AsRef<Path>>(output_root: P) -> PathBuf {
        output_root.as_ref().join(MANIFEST_FILENAME)
    }

    pub fn load<P: AsRef<Path>>(output_root: P) -> Result<Option<Self>> {
        let path = Self::path(&output_root);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save<P: AsRef<Path>>(&self, output_root: P) -> Result<()> {
        let path = Self::path(&output_root);
        let serialized = serde_json::to_string_pretty(self)?;
        crate::ioutils::write_file(&serialized, path)
    }

    /// Every unresolved name across documents, distinct and in document order.
    pub fn unresolved(&self) -> Vec<String> {
        self.documents
            .iter()
            .flat_map(|document| document.unresolved.iter().cloned())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

pub fn sha256_hex(content: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(content.as_ref()))
}
