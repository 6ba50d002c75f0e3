use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to parse glob pattern. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to walk template directory. Original error: {0}")]
    WalkDirError(#[from] walkdir::Error),

    #[error("Invalid placeholder name pattern. Original error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("Prompt failed. Original error: {0}")]
    PromptError(#[from] dialoguer::Error),

    /// Unbalanced delimiters, empty names or names rejected by the name rule.
    #[error("Malformed template at line {line}, column {column} (byte {position}): {reason}.")]
    MalformedTemplate { position: usize, line: usize, column: usize, reason: String },

    /// Raised only under the `fail` unresolved policy.
    #[error("Unresolved placeholders: {}.", .names.join(", "))]
    UnresolvedPlaceholders { names: Vec<String> },

    #[error("Invalid value for '{name}': {reason}.")]
    InvalidValue { name: String, reason: String },

    #[error("Invalid assignment '{0}': expected NAME=VALUE.")]
    InvalidAssignment(String),

    #[error("Configuration error: {0}.")]
    ConfigValidation(String),

    #[error("No configuration file found in '{template_dir}'. Tried: {config_files}.")]
    ConfigNotFound { template_dir: String, config_files: String },

    #[error("No documents apply to customer type '{customer_type}'. Known types: {known}.")]
    UnknownCustomerType { customer_type: String, known: String },

    #[error("Cannot proceed: output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Cannot proceed: template '{path}' does not exist.")]
    TemplateDoesNotExistsError { path: String },

    #[error("Standard input can only be read once, but '-' was given {uses} times.")]
    StdinReusedError { uses: usize },

    #[error("Cannot process '{source_path}'. {e}")]
    ProcessError { source_path: String, e: Box<Error> },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with formfill's Error as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Prints the error to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
