//! Scan command - list the source files a bundle would include
//!
//! This is a dry run of the build command: it discovers exactly the files
//! an aggregate would contain, in concatenation order, without writing
//! anything.

use crate::cli::error::HelpfulError;
use crate::cli::output::{format_size, format_time, print_table_colored};
use crate::cli::validate_output_name;
use comfy_table::Color;
use sqlbundle::scanner::{self, Discovery};
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Debug)]
pub struct ScanArgs {
    pub root: PathBuf,
    pub output: String,
    pub json: bool,
    pub stats: bool,
    pub quiet: bool,
}

/// Execute the scan command
pub fn run(args: ScanArgs) -> anyhow::Result<()> {
    // Validate root exists
    if !args.root.exists() {
        return Err(HelpfulError::path_not_found(&args.root).into());
    }

    // Validate root is a directory
    if !args.root.is_dir() {
        return Err(HelpfulError::not_a_directory(&args.root).into());
    }

    validate_output_name(&args.output)?;

    let discovery = scanner::discover(&args.root, &args.output)?;

    // Output based on format
    if args.json {
        output_json(&args, &discovery)?;
    } else if args.stats {
        output_stats(&args, &discovery);
    } else if args.quiet {
        output_quiet(&discovery);
    } else {
        output_table(&args, &discovery);
    }

    Ok(())
}

/// Output as JSON
fn output_json(args: &ScanArgs, discovery: &Discovery) -> anyhow::Result<()> {
    let result = serde_json::json!({
        "scan_path": args.root.to_string_lossy(),
        "output_name": args.output,
        "files": &discovery.files,
        "summary": &discovery.summary,
    });
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Output as statistics summary
fn output_stats(args: &ScanArgs, discovery: &Discovery) {
    let summary = &discovery.summary;

    println!("Scan: {}", args.root.display());
    println!();
    println!("Source files:   {}", summary.total_files);
    println!("Total Size:     {}", format_size(summary.total_bytes));
    println!("Directories:    {}", summary.dirs_scanned);
    println!("Skipped output: {}", summary.skipped_output);
}

/// Output just file paths (quiet mode)
fn output_quiet(discovery: &Discovery) {
    for file in &discovery.files {
        println!("{}", file.path.display());
    }
}

/// Output as formatted table
fn output_table(args: &ScanArgs, discovery: &Discovery) {
    if discovery.files.is_empty() {
        println!("No .sql files found in: {}", args.root.display());
        return;
    }

    println!(
        "Found {} source files in {} ({} total)",
        discovery.summary.total_files,
        args.root.display(),
        format_size(discovery.summary.total_bytes)
    );
    println!();

    let headers = &["Name", "Size", "Modified", "Path"];

    let rows: Vec<Vec<(String, Option<Color>)>> = discovery
        .files
        .iter()
        .map(|file| {
            let name = file
                .path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string();

            vec![
                (name, None),
                (format_size(file.size), None),
                (format_time(file.modified), None),
                (file.rel_path.clone(), Some(Color::Grey)),
            ]
        })
        .collect();

    print_table_colored(headers, rows);
}
