#![allow(dead_code)]

use formfill::cli::{generate, GenerateArgs, SyntaxArgs, ValueArgs};
use formfill::manifest::GenerationManifest;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const AGREEMENTS: &str = "tests/templates/agreements";

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
///
/// # Arguments
/// * `dir1` - The first directory to compare (actual output).
/// * `dir2` - The second directory to compare (expected output).
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let mut files1 = std::collections::HashSet::new();
    let mut files2 = std::collections::HashSet::new();

    for entry in WalkDir::new(dir1).into_iter().filter_map(Result::ok).filter(|e| e.path().is_file()) {
        files1.insert(entry.path().strip_prefix(dir1).unwrap().to_path_buf());
    }
    for entry in WalkDir::new(dir2).into_iter().filter_map(Result::ok).filter(|e| e.path().is_file()) {
        files2.insert(entry.path().strip_prefix(dir2).unwrap().to_path_buf());
    }

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", dir1);
    println!("Expected output: {:?}", dir2);

    for file in files1.difference(&files2) {
        println!("  + only in ACTUAL: {:?}", file);
    }
    for file in files2.difference(&files1) {
        println!("  - only in EXPECTED: {:?}", file);
    }
    for file in files1.intersection(&files2) {
        let content1 = fs::read_to_string(dir1.join(file)).unwrap_or_default();
        let content2 = fs::read_to_string(dir2.join(file)).unwrap_or_default();
        if content1 != content2 {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{content1}");
            println!("  --- Expected content:\n{content2}");
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Generate arguments for the agreements catalog with a fresh output directory.
pub fn generate_args(output_dir: PathBuf, customer_type: &str, values_file: Option<&str>) -> GenerateArgs {
    GenerateArgs {
        templates_dir: PathBuf::from(AGREEMENTS),
        output_dir,
        customer_type: customer_type.to_string(),
        force: false,
        dry_run: false,
        values: ValueArgs {
            values: values_file.map(|f| vec![f.to_string()]).unwrap_or_default(),
            set: Vec::new(),
            interactive: false,
        },
        syntax: SyntaxArgs::default(),
    }
}

/// Runs `generate`, takes the manifest out of the output directory, and
/// asserts the remaining files match `expected_dir` exactly.
pub fn generate_and_assert(
    customer_type: &str,
    values_file: &str,
    expected_dir: &str,
) -> GenerationManifest {
    let tmp_dir = tempfile::tempdir().unwrap();
    let output_dir = tmp_dir.path().join("out");
    generate(&generate_args(output_dir.clone(), customer_type, Some(values_file))).unwrap();

    let manifest = GenerationManifest::load(&output_dir).unwrap().expect("manifest written");
    fs::remove_file(GenerationManifest::path(&output_dir)).unwrap();

    let different = dir_diff::is_different(&output_dir, expected_dir).unwrap();
    if different {
        print_dir_diff(&output_dir, expected_dir.as_ref());
        panic!("Directories differ. See above for details.");
    }
    debug!("Output matches {expected_dir}");
    manifest
}
