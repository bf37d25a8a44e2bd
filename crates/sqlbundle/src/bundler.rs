//! Aggregate composition and output writing
//!
//! Composes the contents of discovered source files into a single
//! aggregate string, then replaces the output file atomically (write to a
//! temp file in the same directory, then rename) so readers never observe
//! a half-written aggregate and a failed run leaves the previous output
//! intact.

use crate::error::{BundleError, Result};
use crate::scanner::{discover, ScanSummary, SourceFile, DEFAULT_OUTPUT_NAME};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::info;

/// Appended after every source file's content, including the last one.
pub const SEPARATOR: &str = "\n\n";

/// Options for one bundling run
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Directory to scan
    pub root: PathBuf,
    /// Name of the aggregate file, written into the root
    pub output_name: String,
}

impl BundleOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    /// Full path of the aggregate file
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_name)
    }
}

/// Result of a completed bundling run
#[derive(Debug)]
pub struct BundleReport {
    pub output_path: PathBuf,
    /// Source files that went into the aggregate, in composition order
    pub files: Vec<SourceFile>,
    pub summary: ScanSummary,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

/// Freshness of an existing aggregate relative to the current sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Output exists and matches the current sources byte for byte
    UpToDate,
    /// Output does not exist but the sources would produce content
    Missing,
    /// Output exists but differs from the current sources
    Stale,
}

impl CheckOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckOutcome::UpToDate => "up-to-date",
            CheckOutcome::Missing => "missing",
            CheckOutcome::Stale => "stale",
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, CheckOutcome::UpToDate)
    }
}

/// Result of a check run
#[derive(Debug)]
pub struct CheckReport {
    pub outcome: CheckOutcome,
    pub output_path: PathBuf,
    pub files: Vec<SourceFile>,
    pub summary: ScanSummary,
    /// Size the aggregate would have if rebuilt now
    pub expected_bytes: u64,
    pub duration_ms: u64,
}

/// Concatenate the contents of `files` in order, each followed by the
/// separator. Files must be valid UTF-8; the first invalid file aborts
/// the whole composition.
pub fn compose(files: &[SourceFile]) -> Result<String> {
    let capacity: usize = files
        .iter()
        .map(|f| f.size as usize + SEPARATOR.len())
        .sum();
    let mut content = String::with_capacity(capacity);

    for file in files {
        let bytes = fs::read(&file.path).map_err(|e| BundleError::Read {
            path: file.path.display().to_string(),
            source: e,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| BundleError::InvalidUtf8 {
            path: file.path.display().to_string(),
            offset: e.utf8_error().valid_up_to(),
        })?;
        content.push_str(&text);
        content.push_str(SEPARATOR);
    }

    Ok(content)
}

/// Write `content` to `output_path` atomically. The temp file lives in the
/// root so the final rename never crosses a filesystem boundary.
fn write_atomic(root: &Path, output_path: &Path, content: &str) -> Result<()> {
    let write_err = |source: io::Error| BundleError::Write {
        path: output_path.display().to_string(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(root).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.persist(output_path).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Scan the root, compose the aggregate, and replace the output file.
pub fn build(options: &BundleOptions) -> Result<BundleReport> {
    let start = Instant::now();
    let output_path = options.output_path();

    let discovery = discover(&options.root, &options.output_name)?;
    let content = compose(&discovery.files)?;
    write_atomic(&options.root, &output_path, &content)?;

    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        files = discovery.summary.total_files,
        bytes = content.len(),
        duration_ms,
        output = %output_path.display(),
        "Bundle complete"
    );

    Ok(BundleReport {
        output_path,
        files: discovery.files,
        summary: discovery.summary,
        bytes_written: content.len() as u64,
        duration_ms,
    })
}

/// Compare the existing output against what a rebuild would produce,
/// without writing anything. A missing output only counts as up to date
/// when the composition is empty.
pub fn check(options: &BundleOptions) -> Result<CheckReport> {
    let start = Instant::now();
    let output_path = options.output_path();

    let discovery = discover(&options.root, &options.output_name)?;
    let expected = compose(&discovery.files)?;

    let outcome = match fs::read(&output_path) {
        Ok(actual) if actual == expected.as_bytes() => CheckOutcome::UpToDate,
        Ok(_) => CheckOutcome::Stale,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if expected.is_empty() {
                CheckOutcome::UpToDate
            } else {
                CheckOutcome::Missing
            }
        }
        Err(e) => {
            return Err(BundleError::Read {
                path: output_path.display().to_string(),
                source: e,
            })
        }
    };

    Ok(CheckReport {
        outcome,
        output_path,
        files: discovery.files,
        summary: discovery.summary,
        expected_bytes: expected.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
