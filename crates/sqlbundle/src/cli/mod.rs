//! CLI module for sqlbundle
//!
//! This module provides the command-line interface: the `build` command
//! that writes the aggregate, the `scan` command that previews what a
//! build would include, and the `config` command that shows resolved
//! paths.

pub mod build;
pub mod config;
pub mod error;
pub mod output;
pub mod scan;

use error::HelpfulError;

/// The output name must be a bare filename: it is joined onto the scanned
/// root, and discovery excludes it by file name alone.
pub(crate) fn validate_output_name(name: &str) -> Result<(), HelpfulError> {
    if name.is_empty() || name.contains('/') || name.contains('\\') {
        return Err(HelpfulError::invalid_output_name(name));
    }
    Ok(())
}

// Re-exports are used by the command modules
#[allow(unused_imports)]
pub use output::{format_size, format_time, print_table_colored};
