use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path with conversions and checks used by catalogs and manifests
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use formfill::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("terms-of-service.md");
    /// assert_eq!(path.to_str_checked().unwrap(), "terms-of-service.md");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Renders the path with forward slashes regardless of platform.
    fn to_slash_string(&self) -> String;

    /// True for a relative path that cannot escape its base directory
    /// (no root, prefix or `..` components).
    fn is_contained_relative(&self) -> bool;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_slash_string(&self) -> String {
        self.components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    fn is_contained_relative(&self) -> bool {
        !self.as_os_str().is_empty()
            && self
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}
