pub mod args;
pub mod runner;

pub use args::{
    get_log_level_from_verbose, parse_cli, Cli, Commands, GenerateArgs, OutputFormat,
    PlaceholdersArgs, RenderArgs, SyntaxArgs, ValueArgs,
};
pub use runner::{generate, placeholders, render, run};
