//! User-friendly diagnostic messages.
//!
//! Every error shown to the user names the root cause, the nodes involved,
//! and at least one way to fix it.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no manifest file is found.
    pub const NO_MANIFEST: &str =
        "Create a Project.toml or Workspace.toml, or pass --path to point at one";

    /// Suggestion when a target is not found.
    pub const TARGET_NOT_FOUND: &str =
        "Check the target name against the `name` fields in the project's Project.toml";

    /// Suggestion when a referenced project cannot be found.
    pub const CHECK_PROJECT_PATH: &str =
        "Check the `path` of the dependency; it is relative to the declaring project";

    /// Suggestion when a cycle is detected.
    pub const BREAK_CYCLE: &str =
        "Move the shared code into a new target that both targets depend on";
}

/// An error message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let error_prefix = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", error_prefix, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("circular dependency detected")
            .with_context("`B` at /p depends on `A` at /p")
            .with_suggestion("Remove the dependency on `A` from `B`")
            .with_suggestion(suggestions::BREAK_CYCLE);

        let output = diag.format(false);
        assert!(output.contains("error: circular dependency detected"));
        assert!(output.contains("= `B` at /p depends on"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Remove the dependency"));
        assert!(output.contains("2. Move the shared code"));
    }

    #[test]
    fn test_bare_error_has_no_help_block() {
        let output = Diagnostic::error("could not find a manifest").format(false);
        assert_eq!(output, "error: could not find a manifest\n");
    }

    #[test]
    fn test_color_only_changes_prefixes() {
        let diag = Diagnostic::error("boom").with_suggestion("retry");
        let colored = diag.format(true);
        assert!(colored.starts_with("\x1b[1;31merror\x1b[0m: boom\n"));
        assert!(colored.contains("\x1b[1;32mhelp\x1b[0m: consider:"));
        assert!(!diag.format(false).contains('\x1b'));
    }
}
