/// Handles argument parsing and command execution.
pub mod cli;

/// Catalog configuration for agreement templates.
pub mod config;

/// Constants shared across modules.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Generation manifest written next to rendered documents.
pub mod manifest;

/// Interactive prompts for missing values.
pub mod prompt;

/// Placeholder substitution.
pub mod renderer;

/// Template parsing.
pub mod template;

/// Value mappings and their sources.
pub mod values;
