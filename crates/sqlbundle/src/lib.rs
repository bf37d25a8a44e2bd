//! sqlbundle - Aggregate `.sql` files from a directory tree
//!
//! Walks a root directory, collects every `.sql` file in deterministic
//! order, and concatenates them into a single aggregate file written
//! atomically into the root. The aggregate itself is excluded from the
//! scan so repeated runs are stable.

pub mod bundler;
pub mod error;
pub mod scanner;

pub use bundler::{build, check, BundleOptions, BundleReport, CheckOutcome, CheckReport, SEPARATOR};
pub use error::{BundleError, Result};
pub use scanner::{
    discover, is_source_name, Discovery, ScanSummary, SourceFile, DEFAULT_OUTPUT_NAME,
    SOURCE_SUFFIX,
};
