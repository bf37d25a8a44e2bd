//! Error types for the bundling pipeline

use std::io;
use thiserror::Error;

/// Bundle error type
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Root directory not found: {0}")]
    RootNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("File is not valid UTF-8: {path} (first invalid byte at offset {offset})")]
    InvalidUtf8 { path: String, offset: usize },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BundleError>;
