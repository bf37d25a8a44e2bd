//! Source file discovery
//!
//! Walks a root directory and collects every file whose name ends in
//! `.sql`, excluding the reserved output filename wherever it appears so
//! the aggregate can never read itself back in. Results are sorted by
//! relative path: directory-listing order is filesystem-dependent, and
//! downstream consumers need the same order on every platform.

use crate::error::{BundleError, Result};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::info;
use walkdir::WalkDir;

/// Suffix a source file name must carry. This is a *name* test, not an
/// extension test, and it is case-sensitive: `QUERY.SQL` is not a source
/// file, while a file named exactly `.sql` is.
pub const SOURCE_SUFFIX: &str = ".sql";

/// Default name of the aggregate output file.
pub const DEFAULT_OUTPUT_NAME: &str = "db.sql";

/// Normalize a path to use forward slashes consistently.
/// Relative paths are sorted and displayed with '/' separators on every
/// platform, which keeps ordering and JSON output stable on Windows.
fn normalize_path_to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// A discovered source file
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    /// On-disk path, as walked from the scan root
    pub path: PathBuf,
    /// Path relative to the scan root, forward-slash normalized
    pub rel_path: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification time
    #[serde(with = "system_time_serde")]
    pub modified: SystemTime,
}

/// Summary statistics for one discovery pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    /// Number of source files discovered
    pub total_files: usize,
    /// Combined size of all source files in bytes
    pub total_bytes: u64,
    /// Directories visited under the root (the root itself not counted)
    pub dirs_scanned: usize,
    /// Files skipped because their name matched the output filename
    pub skipped_output: usize,
}

/// Result of one discovery pass
#[derive(Debug, Serialize)]
pub struct Discovery {
    /// Source files, sorted by relative path
    pub files: Vec<SourceFile>,
    pub summary: ScanSummary,
}

// Custom serialization for SystemTime (seconds since the Unix epoch)
mod system_time_serde {
    use serde::{Serialize, Serializer};
    use std::time::SystemTime;

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(serde::ser::Error::custom)?;
        duration.as_secs().serialize(serializer)
    }
}

/// Check whether a file name selects it as a source file.
///
/// The output filename is excluded in every directory, not just the root.
pub fn is_source_name(name: &str, output_name: &str) -> bool {
    name != output_name && name.ends_with(SOURCE_SUFFIX)
}

/// Walk `root` and collect all source files, sorted by relative path.
///
/// Walk errors abort the scan: the aggregate must reflect the whole tree,
/// so there is no skip-on-error fallback here.
pub fn discover(root: &Path, output_name: &str) -> Result<Discovery> {
    let root_meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(BundleError::RootNotFound(root.display().to_string()));
        }
        // Stat failures other than absence are not "not found".
        Err(e) => return Err(BundleError::Io(e)),
    };
    if !root_meta.is_dir() {
        return Err(BundleError::NotADirectory(root.display().to_string()));
    }

    let mut files: Vec<SourceFile> = Vec::new();
    let mut summary = ScanSummary::default();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            if path != root {
                summary.dirs_scanned += 1;
            }
            continue;
        }

        // Names that do not decode as UTF-8 can never match the `.sql` rule.
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if !is_source_name(name, output_name) {
            if name == output_name {
                summary.skipped_output += 1;
            }
            continue;
        }

        let metadata = entry.metadata()?;
        let rel_path = path
            .strip_prefix(root)
            .map(normalize_path_to_forward_slashes)
            .unwrap_or_else(|_| normalize_path_to_forward_slashes(path));

        files.push(SourceFile {
            path: path.to_path_buf(),
            rel_path,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        });
    }

    files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));

    summary.total_files = files.len();
    summary.total_bytes = files.iter().map(|f| f.size).sum();

    info!(
        root = %root.display(),
        files = summary.total_files,
        dirs = summary.dirs_scanned,
        skipped_output = summary.skipped_output,
        "Discovery complete"
    );

    Ok(Discovery { files, summary })
}
