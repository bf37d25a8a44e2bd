//! Build command - bundle source files into one aggregate
//!
//! Scans a root directory, concatenates every `.sql` file in sorted
//! order, and writes the aggregate atomically into the root. With
//! `--check`, the existing aggregate is compared against the current
//! sources instead and nothing is written.

use crate::cli::error::HelpfulError;
use crate::cli::output::format_size;
use crate::cli::validate_output_name;
use anyhow::Context;
use sqlbundle::bundler::{self, BundleOptions, CheckOutcome};
use std::path::PathBuf;

/// Arguments for the build command
#[derive(Debug)]
pub struct BuildArgs {
    pub root: PathBuf,
    pub output: String,
    pub check: bool,
    pub json: bool,
    pub quiet: bool,
}

/// Execute the build command
pub fn run(args: BuildArgs) -> anyhow::Result<()> {
    // Validate root exists
    if !args.root.exists() {
        return Err(HelpfulError::path_not_found(&args.root).into());
    }

    // Validate root is a directory
    if !args.root.is_dir() {
        return Err(HelpfulError::not_a_directory(&args.root).into());
    }

    validate_output_name(&args.output)?;

    let options = BundleOptions {
        root: args.root.clone(),
        output_name: args.output.clone(),
    };

    if args.check {
        run_check(&args, &options)
    } else {
        run_build(&args, &options)
    }
}

fn run_build(args: &BuildArgs, options: &BundleOptions) -> anyhow::Result<()> {
    let report = bundler::build(options)
        .with_context(|| format!("Failed to bundle {}", args.root.display()))?;

    if args.json {
        let result = serde_json::json!({
            "output": report.output_path.to_string_lossy(),
            "bytes_written": report.bytes_written,
            "duration_ms": report.duration_ms,
            "files": &report.files,
            "summary": &report.summary,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !args.quiet {
        println!(
            "Bundled {} source files into {} ({})",
            report.summary.total_files,
            report.output_path.display(),
            format_size(report.bytes_written)
        );
    }

    Ok(())
}

fn run_check(args: &BuildArgs, options: &BundleOptions) -> anyhow::Result<()> {
    let report = bundler::check(options)
        .with_context(|| format!("Failed to check {}", args.root.display()))?;

    if report.outcome.is_current() {
        if args.json {
            let result = serde_json::json!({
                "check": report.outcome.as_str(),
                "output": report.output_path.to_string_lossy(),
                "expected_bytes": report.expected_bytes,
                "summary": &report.summary,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if !args.quiet {
            println!(
                "{} is up to date ({} source files, {})",
                report.output_path.display(),
                report.summary.total_files,
                format_size(report.expected_bytes)
            );
        }
        return Ok(());
    }

    // A stale or missing aggregate fails the check so CI can gate on it.
    let what = match report.outcome {
        CheckOutcome::Missing => "does not exist",
        _ => "does not match the current sources",
    };

    Err(HelpfulError::new(format!(
        "Aggregate {} {}",
        report.output_path.display(),
        what
    ))
    .with_context(format!(
        "{} source files would produce {} of output",
        report.summary.total_files,
        format_size(report.expected_bytes)
    ))
    .with_suggestion(format!(
        "TRY: Regenerate it: sqlbundle build {}",
        args.root.display()
    ))
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;

    fn create_test_files(dir: &Path) {
        File::create(dir.join("b.sql"))
            .unwrap()
            .write_all(b"select 2;")
            .unwrap();
        File::create(dir.join("a.sql"))
            .unwrap()
            .write_all(b"select 1;")
            .unwrap();
    }

    fn default_args(root: PathBuf) -> BuildArgs {
        BuildArgs {
            root,
            output: "db.sql".to_string(),
            check: false,
            json: false,
            quiet: true,
        }
    }

    #[test]
    fn test_build_writes_aggregate() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        run(default_args(temp_dir.path().to_path_buf())).unwrap();

        let output = fs::read_to_string(temp_dir.path().join("db.sql")).unwrap();
        assert_eq!(output, "select 1;\n\nselect 2;\n\n");
    }

    #[test]
    fn test_check_passes_after_build() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        run(default_args(temp_dir.path().to_path_buf())).unwrap();

        let mut args = default_args(temp_dir.path().to_path_buf());
        args.check = true;
        run(args).unwrap();
    }

    #[test]
    fn test_check_fails_when_missing() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        let mut args = default_args(temp_dir.path().to_path_buf());
        args.check = true;

        let result = run(args);
        assert!(result.is_err());
        assert!(!temp_dir.path().join("db.sql").exists());
    }

    #[test]
    fn test_check_fails_when_stale() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        run(default_args(temp_dir.path().to_path_buf())).unwrap();

        File::create(temp_dir.path().join("c.sql"))
            .unwrap()
            .write_all(b"select 3;")
            .unwrap();

        let mut args = default_args(temp_dir.path().to_path_buf());
        args.check = true;

        let result = run(args);
        assert!(result.is_err());

        // The failed check must not have rewritten the aggregate.
        let output = fs::read_to_string(temp_dir.path().join("db.sql")).unwrap();
        assert_eq!(output, "select 1;\n\nselect 2;\n\n");
    }

    #[test]
    fn test_build_nonexistent_root() {
        let args = default_args(PathBuf::from("/nonexistent/path/that/does/not/exist"));
        let result = run(args);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_output_name_with_separator() {
        let temp_dir = TempDir::new().unwrap();
        create_test_files(temp_dir.path());

        let mut args = default_args(temp_dir.path().to_path_buf());
        args.output = "sub/db.sql".to_string();

        let result = run(args);
        assert!(result.is_err());
        assert!(!temp_dir.path().join("db.sql").exists());
    }
}
