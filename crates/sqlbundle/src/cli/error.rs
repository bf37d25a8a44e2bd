//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    /// Create a new helpful error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a suggestion for fixing the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add multiple suggestions
    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Path does not exist
    pub fn path_not_found(path: &Path) -> Self {
        Self::new(format!("Path not found: {}", path.display()))
            .with_context("The specified path does not exist on the filesystem")
            .with_suggestions([
                format!("TRY: Check that the path exists: ls -la {}", path.display()),
                "TRY: Verify you have read permissions for this path".to_string(),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    /// Path exists but is not a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self::new(format!("Not a directory: {}", path.display()))
            .with_context("This command expects a directory, not a file")
            .with_suggestions([
                format!("TRY: Pass the directory containing your .sql files: sqlbundle build {}",
                    path.parent().map(|p| p.display().to_string()).unwrap_or_else(|| ".".to_string())),
                "TRY: List what is at that path: ls -la".to_string(),
            ])
    }

    /// Output name contains a path separator or is empty
    pub fn invalid_output_name(name: &str) -> Self {
        Self::new(format!("Invalid output name: '{}'", name))
            .with_context("The output name must be a bare filename; it is always written into the scanned root")
            .with_suggestions([
                "TRY: Use a plain filename like db.sql or all.sql".to_string(),
                "TRY: To bundle a different directory, change the root argument instead".to_string(),
            ])
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// Build the machine-readable error envelope for `--json` mode.
fn error_envelope(err: &anyhow::Error) -> serde_json::Value {
    if let Some(helpful) = err.downcast_ref::<HelpfulError>() {
        serde_json::json!({
            "error": {
                "message": helpful.message,
                "context": helpful.context,
                "suggestions": helpful.suggestions,
            }
        })
    } else {
        serde_json::json!({
            "error": {
                "message": format!("{:#}", err),
            }
        })
    }
}

/// Print an error as JSON on stdout, for consumers driving the CLI
/// programmatically. In json mode stdout carries exactly one JSON value:
/// the command result on success, this envelope on failure.
pub fn print_json_error(err: &anyhow::Error) {
    println!("{}", error_envelope(err));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_helpful_error_display() {
        let err = HelpfulError::new("Something went wrong")
            .with_context("While processing data")
            .with_suggestion("Try again");

        let display = format!("{}", err);
        assert!(display.contains("ERROR: Something went wrong"));
        assert!(display.contains("CONTEXT: While processing data"));
        assert!(display.contains("Try again"));
    }

    #[test]
    fn test_path_not_found() {
        let path = PathBuf::from("/nonexistent/path");
        let err = HelpfulError::path_not_found(&path);

        let display = format!("{}", err);
        assert!(display.contains("/nonexistent/path"));
        assert!(display.contains("TRY:"));
    }

    #[test]
    fn test_invalid_output_name() {
        let err = HelpfulError::invalid_output_name("sub/db.sql");

        let display = format!("{}", err);
        assert!(display.contains("sub/db.sql"));
        assert!(display.contains("TRY:"));
    }

    #[test]
    fn test_error_envelope_includes_suggestions() {
        let err = anyhow::Error::from(HelpfulError::path_not_found(&PathBuf::from("/missing")));
        let envelope = error_envelope(&err);

        assert!(envelope["error"]["message"].as_str().unwrap().contains("/missing"));
        assert!(!envelope["error"]["suggestions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_error_envelope_plain_error() {
        let err = anyhow::anyhow!("plain failure");
        let envelope = error_envelope(&err);

        assert_eq!(envelope["error"]["message"], "plain failure");
        assert!(envelope["error"].get("suggestions").is_none());
    }
}
