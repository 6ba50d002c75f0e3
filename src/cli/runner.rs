use crate::{
    cli::{
        args::{OutputFormat, ValueArgs},
        Cli, Commands, GenerateArgs, PlaceholdersArgs, RenderArgs,
    },
    config::{Config, SelectedDocument},
    error::{Error, Result},
    ext::PathExt,
    ioutils::{ensure_stdin_read_once, get_output_dir, read_template, write_file},
    manifest::{sha256_hex, DocumentRecord, GenerationManifest},
    prompt::{DialoguerPrompter, ValuePrompter},
    renderer::{get_renderer, RenderOptions, Rendered, TemplateRenderer},
    template::Template,
    values::{ValueCollector, ValueMap},
};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Renders a single template to `--output` or stdout.
pub fn render(args: &RenderArgs) -> Result<Rendered> {
    ensure_stdin_read_once(
        std::iter::once(args.template.to_str_checked()?)
            .chain(args.values.values.iter().map(String::as_str)),
    )?;
    let renderer = get_renderer(args.syntax.apply(RenderOptions::default())?);
    let source = read_template(&args.template)?;
    let template = renderer.parse(&source)?;

    let prompter = DialoguerPrompter::new();
    let values =
        collect_values(&args.values, ValueMap::new(), &template.placeholder_names(), &prompter)?;
    let rendered = renderer.render(&template, &values)?;

    match &args.output {
        Some(output) => {
            write_file(&rendered.text, output)?;
            log::info!("Rendered {} to {}", args.template.display(), output.display());
        }
        None => std::io::stdout().write_all(rendered.text.as_bytes())?,
    }
    report_unresolved(&args.template.display().to_string(), &rendered.unresolved);
    Ok(rendered)
}

/// A parsed catalog document waiting to be rendered.
struct PendingDocument {
    document: SelectedDocument,
    source: String,
    template: Template,
}

/// Renders every document selected for the customer type into the output
/// directory and records a generation manifest.
///
/// All documents are rendered before anything is written, so a failing
/// document leaves the output directory untouched.
pub fn generate(args: &GenerateArgs) -> Result<GenerationManifest> {
    let output_root = get_output_dir(&args.output_dir, args.force)?;
    let config = Config::load_validated(&args.templates_dir)?;
    let options = args.syntax.apply(config.render_options()?)?;
    let policy = options.policy;
    let strict = options.strict;
    // Unused values are judged across the whole selection, not per document.
    let renderer = get_renderer(options.with_strict(false));

    let pending = config
        .select(&args.templates_dir, &args.customer_type)?
        .into_iter()
        .map(|document| parse_document(renderer.as_ref(), document))
        .collect::<Result<Vec<_>>>()?;

    let required: Vec<String> = pending
        .iter()
        .flat_map(|p| p.template.placeholder_names())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();
    let prompter = DialoguerPrompter::new();
    let values = collect_values(&args.values, config.default_values()?, &required, &prompter)?;

    let mut manifest = GenerationManifest::new(&args.customer_type, policy);
    let mut outputs: Vec<(PathBuf, String)> = Vec::with_capacity(pending.len());
    let mut targets: HashMap<PathBuf, String> = HashMap::new();
    let mut unused_per_document = Vec::with_capacity(pending.len());
    for PendingDocument { document, source, template } in pending {
        let output_relative = config.output_path(&document.relative);
        if let Some(previous) = targets.insert(output_relative.clone(), document.key.clone()) {
            return Err(Error::ConfigValidation(format!(
                "documents '{previous}' and '{}' both render to '{}'",
                document.key,
                output_relative.to_slash_string()
            )));
        }

        let rendered = renderer
            .render(&template, &values)
            .map_err(|e| process_error(&document.source, e))?;
        report_unresolved(&document.key, &rendered.unresolved);
        unused_per_document.push(rendered.unused);

        manifest.documents.push(DocumentRecord {
            key: document.key,
            title: document.title,
            template: document.relative.to_slash_string(),
            output: output_relative.to_slash_string(),
            template_sha256: sha256_hex(&source),
            output_sha256: sha256_hex(&rendered.text),
            unresolved: rendered.unresolved,
        });
        outputs.push((output_root.join(output_relative), rendered.text));
    }

    if strict {
        for name in unreferenced_values(&unused_per_document) {
            log::warn!("Value '{name}' is not referenced by any selected document");
        }
    }

    if args.dry_run {
        for (target, _) in &outputs {
            log::info!("[dry-run] Would write {}", target.display());
        }
        println!(
            "Dry run: {} documents for '{}' rendered, nothing written.",
            outputs.len(),
            args.customer_type
        );
        return Ok(manifest);
    }

    for (target, text) in &outputs {
        write_file(text, target)?;
        log::info!("Wrote {}", target.display());
    }
    manifest.save(&output_root)?;

    println!(
        "Generated {} documents for '{}' in {}.",
        outputs.len(),
        args.customer_type,
        output_root.display()
    );
    Ok(manifest)
}

/// Distinct placeholder names required by a template, or by every document a
/// customer type selects from a catalog directory.
pub fn placeholders(args: &PlaceholdersArgs) -> Result<Vec<String>> {
    let Some(customer_type) = &args.customer_type else {
        let renderer = get_renderer(args.syntax.apply(RenderOptions::default())?);
        return renderer.placeholders(&read_template(&args.template)?);
    };

    let config = Config::load_validated(&args.template)?;
    let renderer = get_renderer(args.syntax.apply(config.render_options()?)?);
    let mut names = IndexSet::new();
    for document in config.select(&args.template, customer_type)? {
        let parsed = parse_document(renderer.as_ref(), document)?;
        names.extend(parsed.template.placeholder_names());
    }
    Ok(names.into_iter().collect())
}

fn parse_document(
    renderer: &dyn TemplateRenderer,
    document: SelectedDocument,
) -> Result<PendingDocument> {
    let source = std::fs::read_to_string(&document.source)?;
    let template = renderer.parse(&source).map_err(|e| process_error(&document.source, e))?;
    Ok(PendingDocument { document, source, template })
}

/// Names left unused by every document, in the order the first document reports them.
fn unreferenced_values(unused_per_document: &[Vec<String>]) -> Vec<String> {
    let Some((first, rest)) = unused_per_document.split_first() else {
        return Vec::new();
    };
    first
        .iter()
        .filter(|name| rest.iter().all(|unused| unused.contains(name)))
        .cloned()
        .collect()
}

fn collect_values(
    args: &ValueArgs,
    defaults: ValueMap,
    required: &[String],
    prompter: &dyn ValuePrompter,
) -> Result<ValueMap> {
    let prompter = args.interactive.then_some(prompter);
    ValueCollector::new(prompter).collect(defaults, &args.values, &args.set, required)
}

fn process_error(source_path: &Path, e: Error) -> Error {
    Error::ProcessError { source_path: source_path.display().to_string(), e: Box::new(e) }
}

/// Unresolved names are inputs someone must supply before the document is signed.
fn report_unresolved(label: &str, unresolved: &[String]) {
    if unresolved.is_empty() {
        return;
    }
    eprintln!(
        "{label}: {} placeholder(s) need manual input before signature: {}",
        unresolved.len(),
        unresolved.join(", ")
    );
}

fn print_names(names: &[String], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for name in names {
                println!("{name}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(names)?),
    }
    Ok(())
}

/// Main entry point for CLI execution
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Render(args) => {
            render(&args)?;
        }
        Commands::Generate(args) => {
            generate(&args)?;
        }
        Commands::Placeholders(args) => {
            let names = placeholders(&args)?;
            print_names(&names, args.format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn value_used_by_one_document_is_referenced() {
        let unused = vec![
            names(&["SEAT_COUNT", "BREACH_NOTICE_DAYS", "STALE"]),
            names(&["BREACH_NOTICE_DAYS", "STALE"]),
            names(&["SEAT_COUNT", "STALE"]),
        ];
        assert_eq!(unreferenced_values(&unused), vec!["STALE"]);
    }

    #[test]
    fn unreferenced_values_of_single_document() {
        assert_eq!(unreferenced_values(&[names(&["B", "A"])]), vec!["B", "A"]);
        assert!(unreferenced_values(&[]).is_empty());
        assert!(unreferenced_values(&[names(&["A"]), Vec::new()]).is_empty());
    }
}
