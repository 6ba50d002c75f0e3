use crate::constants::{exit_codes, verbosity};
use crate::error::Result;
use crate::renderer::{RenderOptions, UnresolvedPolicy};
use crate::template::{Delimiters, NameRule, NameRuleKind, Syntax};
use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for formfill.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a single template file.
    Render(RenderArgs),
    /// Render every document a customer type needs from a catalog directory.
    Generate(GenerateArgs),
    /// List the placeholder names a template or catalog selection requires.
    Placeholders(PlaceholdersArgs),
}

/// Where placeholder values come from.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ValueArgs {
    /// Values file (JSON or YAML), or `-` to read from stdin. Repeatable.
    #[arg(long = "values", value_name = "FILE")]
    pub values: Vec<String>,

    /// A single value as NAME=VALUE. Repeatable; overrides values files.
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
    pub set: Vec<String>,

    /// Prompt for placeholders that no source provides.
    #[arg(short, long)]
    pub interactive: bool,
}

/// Placeholder syntax and unresolved handling; overrides catalog settings.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SyntaxArgs {
    /// Placeholder delimiters as OPEN,CLOSE.
    #[arg(long, value_name = "OPEN,CLOSE", value_parser = parse_delimiters)]
    pub delimiters: Option<Delimiters>,

    /// Naming convention placeholder names must follow.
    #[arg(long, value_enum)]
    pub name_rule: Option<NameRuleKind>,

    /// Regex placeholder names must match; takes precedence over --name-rule.
    #[arg(long, value_name = "REGEX")]
    pub name_pattern: Option<String>,

    /// What to do with placeholders that have no value.
    #[arg(short, long, value_enum)]
    pub unresolved: Option<UnresolvedPolicy>,

    /// Warn about values no template references.
    #[arg(long)]
    pub strict: bool,
}

impl SyntaxArgs {
    /// Overlays the flags that were given on top of `base`.
    pub fn apply(&self, base: RenderOptions) -> Result<RenderOptions> {
        let delimiters = self.delimiters.clone().unwrap_or(base.syntax.delimiters.clone());
        let name_rule = match (&self.name_pattern, self.name_rule) {
            (Some(pattern), _) => NameRule::pattern(pattern)?,
            (None, Some(kind)) => kind.into(),
            (None, None) => base.syntax.name_rule.clone(),
        };
        let policy = self.unresolved.unwrap_or(base.policy);
        let strict = base.strict || self.strict;
        Ok(base
            .with_syntax(Syntax::new(delimiters, name_rule)?)
            .with_policy(policy)
            .with_strict(strict))
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Template file, or `-` to read from stdin.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// Write the rendered document here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub values: ValueArgs,

    #[command(flatten)]
    pub syntax: SyntaxArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directory holding the catalog (formfill.yaml) and its templates.
    #[arg(value_name = "TEMPLATES_DIR")]
    pub templates_dir: PathBuf,

    /// Destination directory for rendered documents.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Customer type that selects which documents apply.
    #[arg(short, long)]
    pub customer_type: String,

    /// Force overwrite of an existing output directory.
    #[arg(short, long)]
    pub force: bool,

    /// Render and report without touching the filesystem.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub values: ValueArgs,

    #[command(flatten)]
    pub syntax: SyntaxArgs,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PlaceholdersArgs {
    /// Template file, or a catalog directory when --customer-type is given.
    #[arg(value_name = "TEMPLATE")]
    pub template: PathBuf,

    /// List names across every document selected for this customer type.
    #[arg(short, long)]
    pub customer_type: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub syntax: SyntaxArgs,
}

fn parse_delimiters(pair: &str) -> std::result::Result<Delimiters, String> {
    Delimiters::from_pair(pair).map_err(|e| e.to_string())
}

/// Parse command line arguments, printing help when a required input is missing.
pub fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
