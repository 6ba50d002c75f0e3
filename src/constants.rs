//! Constants used throughout formfill

/// Catalog configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["formfill.json", "formfill.yaml", "formfill.yml"];

/// Default opening placeholder delimiter
pub const DEFAULT_OPEN_DELIMITER: &str = "{{";

/// Default closing placeholder delimiter
pub const DEFAULT_CLOSE_DELIMITER: &str = "}}";

/// Generation manifest written into the output directory
pub const MANIFEST_FILENAME: &str = ".formfill-manifest.json";

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Formatting defaults for typed values
pub mod format {
    /// `January 31, 2026`
    pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";
    pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
    pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
    pub const THOUSANDS_SEPARATOR: char = ',';
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
