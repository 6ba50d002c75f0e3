//! Catalog configuration for agreement templates
//!
//! This module contains the catalog components:
//! - `types`: Document entries and selected documents
//! - `loader`: Catalog file loading, validation and render settings
//! - `selection`: Picking the documents that apply to a customer type

pub mod loader;
pub mod selection;
pub mod types;


pub use loader::{Config, ConfigV1};
pub use types::{DocumentEntry, SelectedDocument};
